//! Payment collaborator.
//!
//! Abstraction over whatever payment processor charges the account. In
//! production this would wrap a real gateway integration.

use crate::types::{AccountId, Money};
use std::sync::Arc;
use thiserror::Error;

/// Payment collaborator error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The charge was refused
    #[error("Payment declined: {reason}")]
    Declined {
        /// Decline reason
        reason: String,
    },
    /// The payment processor could not be reached
    #[error("Payment service unavailable: {reason}")]
    Unavailable {
        /// Failure reason
        reason: String,
    },
}

/// Proof of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Reference issued by the payment processor
    pub reference: String,
}

/// Payment service trait
///
/// Called at most once per purchase, after validation.
pub trait TicketPaymentService: Send + Sync {
    /// Charge `amount` to `account_id`
    ///
    /// # Errors
    ///
    /// Returns error if the charge is not taken
    fn make_payment(
        &self,
        account_id: AccountId,
        amount: Money,
    ) -> Result<PaymentReceipt, PaymentError>;
}

/// Mock payment gateway (always succeeds for development)
#[derive(Clone, Debug)]
pub struct MockPaymentGateway;

impl MockPaymentGateway {
    /// Creates a new mock payment gateway
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn TicketPaymentService> {
        Arc::new(Self::new())
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketPaymentService for MockPaymentGateway {
    fn make_payment(
        &self,
        account_id: AccountId,
        amount: Money,
    ) -> Result<PaymentReceipt, PaymentError> {
        let reference = format!("PAYMENT-REF-{}", uuid::Uuid::new_v4());

        tracing::info!(
            account_id = account_id.get(),
            amount = amount.pounds(),
            reference = %reference,
            "Mock payment processed successfully"
        );

        Ok(PaymentReceipt { reference })
    }
}
