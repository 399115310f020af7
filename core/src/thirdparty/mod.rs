//! External collaborators called once a batch has been validated.
//!
//! The ticket service never moves money or picks seats itself. It hands the
//! amount to a [`TicketPaymentService`] and the seat count to a
//! [`SeatReservationService`], both of which are fallible and may be backed by
//! remote systems.
//!
//! The mock implementations always succeed and are meant for development and
//! demos. Both are assumed to leave no trace when they fail.

pub mod payment;
pub mod reservation;

pub use payment::{MockPaymentGateway, PaymentError, PaymentReceipt, TicketPaymentService};
pub use reservation::{
    MockSeatReservationService, ReservationError, ReservationReceipt, SeatReservationService,
};
