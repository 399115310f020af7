//! The ticket purchasing service.
//!
//! ```text
//! purchase_tickets(account, requests)
//!        │
//!        ├─► validate account        ── InvalidAccount
//!        ├─► validate batch (policy) ── EmptyPurchase / InvalidTicketCount /
//!        │                              AdultRequired / TicketLimitExceeded /
//!        │                              AmountOverflow
//!        ├─► make_payment(account, total_amount)
//!        │        └── error ─► FulfillmentFailed(PaymentFailed)
//!        ├─► reserve_seats(account, seat_count)
//!        │        └── error ─► FulfillmentFailed(ReservationFailed)
//!        └─► PurchaseOutcome
//! ```
//!
//! No collaborator is called until every validation step has passed. A payment
//! failure stops the purchase before any seat is reserved.

use crate::config::Config;
use crate::error::{FulfillmentError, PurchaseError, Result};
use crate::pricing::{PurchasePolicy, PurchaseSummary};
use crate::thirdparty::{SeatReservationService, TicketPaymentService};
use crate::types::{AccountId, PurchaseOutcome, TicketTypeRequest};
use std::sync::Arc;

/// Validates ticket purchases and fulfils them through the collaborators.
///
/// Holds no per-purchase state, so one instance can serve concurrent callers
/// as long as the collaborators can.
#[derive(Clone)]
pub struct TicketService {
    payments: Arc<dyn TicketPaymentService>,
    reservations: Arc<dyn SeatReservationService>,
    policy: PurchasePolicy,
}

impl TicketService {
    /// Creates a service with the standard policy
    #[must_use]
    pub fn new(
        payments: Arc<dyn TicketPaymentService>,
        reservations: Arc<dyn SeatReservationService>,
    ) -> Self {
        Self {
            payments,
            reservations,
            policy: PurchasePolicy::STANDARD,
        }
    }

    /// Creates a service whose policy comes from configuration
    #[must_use]
    pub fn from_config(
        config: &Config,
        payments: Arc<dyn TicketPaymentService>,
        reservations: Arc<dyn SeatReservationService>,
    ) -> Self {
        Self::new(payments, reservations).with_policy(config.policy())
    }

    /// Replaces the purchase policy
    #[must_use]
    pub fn with_policy(mut self, policy: PurchasePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Policy in force
    #[must_use]
    pub const fn policy(&self) -> &PurchasePolicy {
        &self.policy
    }

    /// Purchases tickets for a raw account id.
    ///
    /// The account id is checked before the batch, so an invalid id is reported
    /// even when the batch is also invalid.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::InvalidAccount`] if `account_id` is not positive
    /// - any batch validation error from [`PurchasePolicy::validate`]
    /// - [`PurchaseError::FulfillmentFailed`] if a collaborator fails
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseOutcome> {
        let account_id = AccountId::new(account_id).inspect_err(|err| {
            tracing::warn!(error = %err, "Purchase rejected");
        })?;
        self.purchase(account_id, requests)
    }

    /// Purchases tickets for an already-validated account.
    ///
    /// # Errors
    ///
    /// - any batch validation error from [`PurchasePolicy::validate`]
    /// - [`PurchaseError::FulfillmentFailed`] if a collaborator fails
    pub fn purchase(
        &self,
        account_id: AccountId,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseOutcome> {
        let summary = self.policy.validate(requests).inspect_err(|err| {
            tracing::warn!(account_id = account_id.get(), error = %err, "Purchase rejected");
        })?;

        tracing::debug!(
            account_id = account_id.get(),
            total_tickets = summary.total_tickets(),
            total_amount = summary.total_amount.pounds(),
            seat_count = summary.seat_count,
            "Purchase validated"
        );

        self.fulfil(account_id, &summary).map_err(|err| {
            tracing::warn!(account_id = account_id.get(), error = %err, "Purchase fulfillment failed");
            PurchaseError::from(err)
        })
    }

    fn fulfil(
        &self,
        account_id: AccountId,
        summary: &PurchaseSummary,
    ) -> std::result::Result<PurchaseOutcome, FulfillmentError> {
        let payment = self
            .payments
            .make_payment(account_id, summary.total_amount)
            .map_err(FulfillmentError::PaymentFailed)?;

        let reservation = self
            .reservations
            .reserve_seats(account_id, summary.seat_count)
            .map_err(FulfillmentError::ReservationFailed)?;

        tracing::info!(
            account_id = account_id.get(),
            total_amount = summary.total_amount.pounds(),
            seat_count = summary.seat_count,
            payment_reference = %payment.reference,
            reservation_reference = %reservation.reference,
            "Tickets purchased"
        );

        Ok(PurchaseOutcome {
            success: true,
            total_amount: summary.total_amount,
            seat_count: summary.seat_count,
            payment_reference: payment.reference,
            reservation_reference: reservation.reference,
        })
    }
}

impl Default for TicketService {
    fn default() -> Self {
        use crate::thirdparty::{MockPaymentGateway, MockSeatReservationService};
        Self::new(MockPaymentGateway::shared(), MockSeatReservationService::shared())
    }
}

impl std::fmt::Debug for TicketService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Money, TicketType};

    fn family() -> Vec<TicketTypeRequest> {
        vec![
            TicketTypeRequest::new(TicketType::Adult, 2),
            TicketTypeRequest::new(TicketType::Child, 2),
            TicketTypeRequest::new(TicketType::Infant, 2),
        ]
    }

    #[test]
    fn purchase_with_mock_collaborators() {
        let service = TicketService::default();
        let outcome = service.purchase_tickets(123, &family()).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.total_amount, Money::from_pounds(60));
        assert_eq!(outcome.seat_count, 4);
        assert!(outcome.payment_reference.starts_with("PAYMENT-REF-"));
        assert!(outcome.reservation_reference.starts_with("RESERVATION-REF-"));
    }

    #[test]
    fn account_checked_before_batch() {
        let service = TicketService::default();
        let err = service.purchase_tickets(0, &[]).unwrap_err();
        assert!(matches!(err, PurchaseError::InvalidAccount { .. }));
    }

    #[test]
    fn custom_policy_is_applied() {
        let service = TicketService::default().with_policy(PurchasePolicy::new(
            crate::pricing::PriceTable::STANDARD,
            5,
        ));
        let err = service.purchase_tickets(1, &family()).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::TicketLimitExceeded {
                requested: 6,
                max: 5
            }
        );
    }
}
