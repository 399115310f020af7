//! Ergonomic testing utilities for purchases
//!
//! This module provides a fluent API for testing the ticket service with readable
//! Given-When-Then syntax. Collaborators are always recording doubles so tests can
//! assert which side effects happened.

#![allow(clippy::module_name_repetitions)] // PurchaseTest is the natural name

use crate::mocks::{RecordingPaymentService, RecordingSeatReservationService};
use cinema_tickets_core::{
    AccountId, Money, PaymentError, PurchaseError, PurchaseOutcome, PurchasePolicy,
    ReservationError, TicketService, TicketTypeRequest,
};
use std::sync::Arc;

/// Type alias for outcome assertion functions
type OutcomeAssertion = Box<dyn FnOnce(&PurchaseOutcome)>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&PurchaseError)>;

/// Type alias for collaborator call assertion functions
type CallAssertion = Box<dyn FnOnce(&[(AccountId, Money)], &[(AccountId, u32)])>;

/// Fluent API for testing purchases with Given-When-Then syntax
///
/// # Example
///
/// ```
/// use cinema_tickets_core::PurchaseError;
/// use cinema_tickets_testing::{PurchaseTest, assertions, helpers};
///
/// PurchaseTest::new()
///     .when_purchasing(helpers::TEST_ACCOUNT, helpers::unaccompanied_batch())
///     .then_error(|err| assert!(matches!(err, PurchaseError::AdultRequired { .. })))
///     .then_calls(assertions::assert_no_side_effects)
///     .run();
/// ```
pub struct PurchaseTest {
    policy: PurchasePolicy,
    payments: RecordingPaymentService,
    reservations: RecordingSeatReservationService,
    purchase: Option<(i64, Vec<TicketTypeRequest>)>,
    outcome_assertions: Vec<OutcomeAssertion>,
    error_assertions: Vec<ErrorAssertion>,
    call_assertions: Vec<CallAssertion>,
}

impl Default for PurchaseTest {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseTest {
    /// Create a new purchase test with the standard policy and succeeding collaborators
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: PurchasePolicy::STANDARD,
            payments: RecordingPaymentService::new(),
            reservations: RecordingSeatReservationService::new(),
            purchase: None,
            outcome_assertions: Vec::new(),
            error_assertions: Vec::new(),
            call_assertions: Vec::new(),
        }
    }

    /// Set the purchase policy (Given)
    #[must_use]
    pub fn given_policy(mut self, policy: PurchasePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Make the payment collaborator fail (Given)
    #[must_use]
    pub fn given_payment_failure(mut self, error: PaymentError) -> Self {
        self.payments = RecordingPaymentService::failing(error);
        self
    }

    /// Make the reservation collaborator fail (Given)
    #[must_use]
    pub fn given_reservation_failure(mut self, error: ReservationError) -> Self {
        self.reservations = RecordingSeatReservationService::failing(error);
        self
    }

    /// Set the purchase to attempt (When)
    #[must_use]
    pub fn when_purchasing(mut self, account_id: i64, requests: Vec<TicketTypeRequest>) -> Self {
        self.purchase = Some((account_id, requests));
        self
    }

    /// Add an assertion about a successful outcome (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&PurchaseOutcome) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the rejection (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&PurchaseError) + 'static,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the charges and reservations attempted (Then)
    #[must_use]
    pub fn then_calls<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[(AccountId, Money)], &[(AccountId, u32)]) + 'static,
    {
        self.call_assertions.push(Box::new(assertion));
        self
    }

    /// Run the purchase and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no purchase was set, if outcome assertions were registered but
    /// the purchase failed (or vice versa), or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let (account_id, requests) = self
            .purchase
            .expect("Purchase must be set with when_purchasing()");

        let payments = Arc::new(self.payments);
        let reservations = Arc::new(self.reservations);
        let service = TicketService::new(payments.clone(), reservations.clone())
            .with_policy(self.policy);

        match service.purchase_tickets(account_id, &requests) {
            Ok(outcome) => {
                assert!(
                    self.error_assertions.is_empty(),
                    "Expected the purchase to fail, but it succeeded: {outcome:?}"
                );
                for assertion in self.outcome_assertions {
                    assertion(&outcome);
                }
            }
            Err(err) => {
                assert!(
                    self.outcome_assertions.is_empty(),
                    "Expected the purchase to succeed, but it failed: {err}"
                );
                for assertion in self.error_assertions {
                    assertion(&err);
                }
            }
        }

        let charges = payments.calls();
        let seats = reservations.calls();
        for assertion in self.call_assertions {
            assertion(&charges, &seats);
        }
    }
}

/// Helper assertions for collaborator calls
pub mod assertions {
    use cinema_tickets_core::{AccountId, Money};

    /// Assert that neither collaborator was called
    ///
    /// # Panics
    ///
    /// Panics if any charge or reservation was attempted.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_side_effects(charges: &[(AccountId, Money)], seats: &[(AccountId, u32)]) {
        assert!(
            charges.is_empty() && seats.is_empty(),
            "Expected no collaborator calls, but found charges {charges:?} and reservations {seats:?}"
        );
    }

    /// Assert exactly one charge and one reservation with the given values
    ///
    /// # Panics
    ///
    /// Panics if the calls don't match.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_fulfilled(
        charges: &[(AccountId, Money)],
        seats: &[(AccountId, u32)],
        amount: Money,
        seat_count: u32,
    ) {
        assert_eq!(charges.len(), 1, "Expected one charge, found {charges:?}");
        assert_eq!(seats.len(), 1, "Expected one reservation, found {seats:?}");
        assert_eq!(charges[0].1, amount, "Unexpected charge amount");
        assert_eq!(seats[0].1, seat_count, "Unexpected seat count");
        assert_eq!(charges[0].0, seats[0].0, "Charge and reservation accounts differ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{TEST_ACCOUNT, family_batch, request};
    use cinema_tickets_core::TicketType;

    #[test]
    fn test_purchase_test_success() {
        PurchaseTest::new()
            .when_purchasing(TEST_ACCOUNT, family_batch())
            .then_outcome(|outcome| {
                assert_eq!(outcome.total_amount, Money::from_pounds(60));
                assert_eq!(outcome.payment_reference, "PAYMENT-1");
                assert_eq!(outcome.reservation_reference, "RESERVATION-1");
            })
            .then_calls(|charges, seats| {
                assertions::assert_fulfilled(charges, seats, Money::from_pounds(60), 4);
            })
            .run();
    }

    #[test]
    fn test_purchase_test_rejection() {
        PurchaseTest::new()
            .when_purchasing(TEST_ACCOUNT, vec![request(TicketType::Adult, 0)])
            .then_error(|err| {
                assert!(matches!(err, PurchaseError::InvalidTicketCount { .. }));
            })
            .then_calls(assertions::assert_no_side_effects)
            .run();
    }
}
