//! Error types for ticket purchases.

use crate::thirdparty::{PaymentError, ReservationError};
use crate::types::TicketType;
use thiserror::Error;

/// Result type alias for purchase operations.
pub type Result<T> = std::result::Result<T, PurchaseError>;

/// Every way a purchase can be rejected.
///
/// All variants reject the whole batch. Validation variants are raised before
/// any collaborator is called; [`PurchaseError::FulfillmentFailed`] is the only
/// variant that can occur after a side effect was attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    // ═══════════════════════════════════════════════════════════
    // Boundary Errors
    // ═══════════════════════════════════════════════════════════

    /// Account identifier is not a positive integer.
    #[error("Invalid account id: {value}")]
    InvalidAccount {
        /// The rejected input, as supplied
        value: String,
    },

    /// Ticket category is not one of INFANT, CHILD or ADULT.
    #[error("Invalid ticket type: {value}")]
    InvalidTicketType {
        /// The rejected input, as supplied
        value: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Batch Validation Errors
    // ═══════════════════════════════════════════════════════════

    /// A request asks for fewer than one ticket (or the count is not an integer).
    #[error("No of {ticket_type} tickets must be at least 1")]
    InvalidTicketCount {
        /// Ticket type of the offending request
        ticket_type: TicketType,
        /// The rejected count, as supplied
        value: String,
    },

    /// No requests were submitted.
    #[error("No of tickets must be at least 1")]
    EmptyPurchase,

    /// Child or infant tickets were requested without an adult ticket.
    #[error("{ticket_type} tickets cannot be purchased without purchasing an adult ticket")]
    AdultRequired {
        /// First non-adult ticket type found in the batch
        ticket_type: TicketType,
    },

    /// The batch asks for more tickets than one purchase allows.
    #[error("No of tickets cannot exceed {max}")]
    TicketLimitExceeded {
        /// Total tickets requested
        requested: u64,
        /// Maximum allowed per purchase
        max: u32,
    },

    /// The price total is too large to charge.
    #[error("Total amount for this purchase is too large")]
    AmountOverflow,

    // ═══════════════════════════════════════════════════════════
    // Fulfillment Errors
    // ═══════════════════════════════════════════════════════════

    /// Payment or seat reservation failed after validation passed.
    #[error("Payment and/or seat reservation failed")]
    FulfillmentFailed(#[source] FulfillmentError),
}

impl PurchaseError {
    /// Returns true if the batch was rejected before any collaborator was called.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::FulfillmentFailed(_))
    }

    /// Returns the fulfillment cause, if this is a collaborator failure.
    #[must_use]
    pub const fn fulfillment(&self) -> Option<&FulfillmentError> {
        match self {
            Self::FulfillmentFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Which collaborator failed while fulfilling a validated batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FulfillmentError {
    /// The payment collaborator rejected the charge.
    #[error("Payment failed")]
    PaymentFailed(#[source] PaymentError),

    /// The reservation collaborator could not reserve the seats.
    #[error("Seat reservation failed")]
    ReservationFailed(#[source] ReservationError),
}

impl From<FulfillmentError> for PurchaseError {
    fn from(err: FulfillmentError) -> Self {
        Self::FulfillmentFailed(err)
    }
}
