//! # Cinema Tickets Testing
//!
//! Testing utilities for the ticket purchasing service.
//!
//! This crate provides:
//! - Collaborator doubles that record calls or fail on demand
//! - Fixtures for common batches and accounts
//! - Property-based testing strategies for domain types
//! - A Given-When-Then harness for purchases ([`PurchaseTest`])
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_testing::{helpers, PurchaseTest};
//!
//! PurchaseTest::new()
//!     .when_purchasing(helpers::TEST_ACCOUNT, helpers::family_batch())
//!     .then_outcome(|outcome| assert_eq!(outcome.seat_count, 4))
//!     .then_calls(|payments, reservations| {
//!         assert_eq!(payments.len(), 1);
//!         assert_eq!(reservations.len(), 1);
//!     })
//!     .run();
//! ```

use cinema_tickets_core::{
    AccountId, Money, PaymentError, PaymentReceipt, ReservationError, ReservationReceipt,
    SeatReservationService, TicketPaymentService,
};
use std::sync::{Mutex, PoisonError};

mod purchase_test;

pub use purchase_test::{PurchaseTest, assertions};

/// Collaborator doubles
pub mod mocks {
    use super::{
        AccountId, Money, Mutex, PaymentError, PaymentReceipt, PoisonError, ReservationError,
        ReservationReceipt, SeatReservationService, TicketPaymentService,
    };
    use std::sync::Arc;

    /// Payment collaborator that records every charge.
    ///
    /// Succeeds with sequential references (`PAYMENT-1`, `PAYMENT-2`, ...)
    /// unless built with [`RecordingPaymentService::failing`].
    #[derive(Debug, Default)]
    pub struct RecordingPaymentService {
        calls: Mutex<Vec<(AccountId, Money)>>,
        failure: Option<PaymentError>,
    }

    impl RecordingPaymentService {
        /// Create a service that accepts every charge
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a service that rejects every charge with `error`
        #[must_use]
        pub fn failing(error: PaymentError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Some(error),
            }
        }

        /// Create an Arc-wrapped service that accepts every charge
        #[must_use]
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::new())
        }

        /// Charges attempted so far, in call order
        #[must_use]
        pub fn calls(&self) -> Vec<(AccountId, Money)> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl TicketPaymentService for RecordingPaymentService {
        fn make_payment(
            &self,
            account_id: AccountId,
            amount: Money,
        ) -> Result<PaymentReceipt, PaymentError> {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push((account_id, amount));
            match &self.failure {
                Some(error) => Err(error.clone()),
                None => Ok(PaymentReceipt {
                    reference: format!("PAYMENT-{}", calls.len()),
                }),
            }
        }
    }

    /// Seat reservation collaborator that records every reservation.
    ///
    /// Succeeds with sequential references (`RESERVATION-1`, ...) unless built
    /// with [`RecordingSeatReservationService::failing`].
    #[derive(Debug, Default)]
    pub struct RecordingSeatReservationService {
        calls: Mutex<Vec<(AccountId, u32)>>,
        failure: Option<ReservationError>,
    }

    impl RecordingSeatReservationService {
        /// Create a service that accepts every reservation
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a service that rejects every reservation with `error`
        #[must_use]
        pub fn failing(error: ReservationError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Some(error),
            }
        }

        /// Create an Arc-wrapped service that accepts every reservation
        #[must_use]
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::new())
        }

        /// Reservations attempted so far, in call order
        #[must_use]
        pub fn calls(&self) -> Vec<(AccountId, u32)> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl SeatReservationService for RecordingSeatReservationService {
        fn reserve_seats(
            &self,
            account_id: AccountId,
            seat_count: u32,
        ) -> Result<ReservationReceipt, ReservationError> {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push((account_id, seat_count));
            match &self.failure {
                Some(error) => Err(error.clone()),
                None => Ok(ReservationReceipt {
                    reference: format!("RESERVATION-{}", calls.len()),
                }),
            }
        }
    }
}

/// Fixtures for common purchases
pub mod helpers {
    use cinema_tickets_core::{TicketType, TicketTypeRequest};

    /// Account id used throughout the tests
    pub const TEST_ACCOUNT: i64 = 123;

    /// Shorthand for building a request
    #[must_use]
    pub const fn request(ticket_type: TicketType, count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(ticket_type, count)
    }

    /// Two adults, two children, two infants: £60 and four seats
    #[must_use]
    pub fn family_batch() -> Vec<TicketTypeRequest> {
        vec![
            request(TicketType::Adult, 2),
            request(TicketType::Child, 2),
            request(TicketType::Infant, 2),
        ]
    }

    /// Ten of each type: thirty tickets, over the limit
    #[must_use]
    pub fn oversized_batch() -> Vec<TicketTypeRequest> {
        vec![
            request(TicketType::Adult, 10),
            request(TicketType::Child, 10),
            request(TicketType::Infant, 10),
        ]
    }

    /// One infant and one child, no adult
    #[must_use]
    pub fn unaccompanied_batch() -> Vec<TicketTypeRequest> {
        vec![request(TicketType::Infant, 1), request(TicketType::Child, 1)]
    }

    /// Install a test log subscriber; safe to call from every test
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use cinema_tickets_core::{MAX_TICKETS_PER_PURCHASE, TicketType, TicketTypeRequest};
    use proptest::prelude::*;

    /// Any ticket type
    pub fn ticket_type() -> impl Strategy<Value = TicketType> {
        prop_oneof![
            Just(TicketType::Infant),
            Just(TicketType::Child),
            Just(TicketType::Adult),
        ]
    }

    /// Infant or child
    pub fn non_adult_type() -> impl Strategy<Value = TicketType> {
        prop_oneof![Just(TicketType::Infant), Just(TicketType::Child)]
    }

    /// A request with a positive count no larger than `max_count`
    pub fn request(max_count: u32) -> impl Strategy<Value = TicketTypeRequest> {
        (ticket_type(), 1..=max_count)
            .prop_map(|(ticket_type, count)| TicketTypeRequest::new(ticket_type, count))
    }

    /// A batch that passes validation: at least one adult, positive counts,
    /// total within the limit
    pub fn valid_batch() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
        (1..=5u32, prop::collection::vec(request(5), 0..4))
            .prop_map(|(adults, others)| {
                let mut batch = vec![TicketTypeRequest::new(TicketType::Adult, adults)];
                batch.extend(others);
                batch
            })
            .prop_filter("total within limit", |batch| {
                total_tickets(batch) <= u64::from(MAX_TICKETS_PER_PURCHASE)
            })
            .prop_shuffle()
    }

    /// A batch with positive counts whose total exceeds the limit
    pub fn oversized_batch() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
        (
            1..=MAX_TICKETS_PER_PURCHASE,
            prop::collection::vec(request(MAX_TICKETS_PER_PURCHASE), 1..5),
        )
            .prop_map(|(adults, others)| {
                let mut batch = vec![TicketTypeRequest::new(TicketType::Adult, adults)];
                batch.extend(others);
                batch
            })
            .prop_filter("total over limit", |batch| {
                total_tickets(batch) > u64::from(MAX_TICKETS_PER_PURCHASE)
            })
            .prop_shuffle()
    }

    /// A non-empty batch with positive counts and no adult request
    pub fn adultless_batch() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
        prop::collection::vec(
            (non_adult_type(), 1..=10u32)
                .prop_map(|(ticket_type, count)| TicketTypeRequest::new(ticket_type, count)),
            1..5,
        )
    }

    /// Sum of counts across a batch
    #[must_use]
    pub fn total_tickets(batch: &[TicketTypeRequest]) -> u64 {
        batch.iter().map(|r| u64::from(r.count())).sum()
    }
}
