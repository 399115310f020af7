//! # Cinema Tickets Core
//!
//! Validation, pricing and fulfilment of cinema ticket purchases.
//!
//! A purchase is an account id plus an ordered batch of [`TicketTypeRequest`]s.
//! The [`TicketService`] rejects the whole batch if any rule is broken, and only
//! then charges the account and reserves seats through two external
//! collaborators.
//!
//! ## Rules
//!
//! - At least one request, each for at least one ticket
//! - No more than 20 tickets per purchase
//! - Child and infant tickets need an adult ticket in the same batch
//! - Infants are free and do not get a seat; children cost £10, adults £20
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_core::{TicketService, TicketType, TicketTypeRequest};
//!
//! let service = TicketService::default();
//! let outcome = service.purchase_tickets(123, &[
//!     TicketTypeRequest::new(TicketType::Adult, 2),
//!     TicketTypeRequest::new(TicketType::Child, 2),
//!     TicketTypeRequest::new(TicketType::Infant, 2),
//! ])?;
//!
//! assert_eq!(outcome.total_amount.pounds(), 60);
//! assert_eq!(outcome.seat_count, 4);
//! # Ok::<(), cinema_tickets_core::PurchaseError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod pricing;
pub mod service;
pub mod thirdparty;
pub mod types;

pub use config::Config;
pub use error::{FulfillmentError, PurchaseError, Result};
pub use pricing::{MAX_TICKETS_PER_PURCHASE, PriceTable, PurchasePolicy, PurchaseSummary};
pub use service::TicketService;
pub use thirdparty::{
    MockPaymentGateway, MockSeatReservationService, PaymentError, PaymentReceipt,
    ReservationError, ReservationReceipt, SeatReservationService, TicketPaymentService,
};
pub use types::{AccountId, Money, PurchaseOutcome, TicketType, TicketTypeRequest};
