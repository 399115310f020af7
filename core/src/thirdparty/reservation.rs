//! Seat reservation collaborator.

use crate::types::AccountId;
use std::sync::Arc;
use thiserror::Error;

/// Seat reservation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// Not enough free seats for the request
    #[error("No seats available for {requested} requested")]
    NoSeatsAvailable {
        /// Seats requested
        requested: u32,
    },
    /// The booking system could not be reached
    #[error("Seat reservation service unavailable: {reason}")]
    Unavailable {
        /// Failure reason
        reason: String,
    },
}

/// Proof of a successful reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReceipt {
    /// Reference issued by the booking system
    pub reference: String,
}

/// Seat reservation trait
///
/// Called at most once per purchase, after payment has been taken.
pub trait SeatReservationService: Send + Sync {
    /// Reserve `seat_count` seats for `account_id`
    ///
    /// # Errors
    ///
    /// Returns error if the seats are not reserved
    fn reserve_seats(
        &self,
        account_id: AccountId,
        seat_count: u32,
    ) -> Result<ReservationReceipt, ReservationError>;
}

/// Mock seat reservation service (always succeeds for development)
#[derive(Clone, Debug, Default)]
pub struct MockSeatReservationService;

impl MockSeatReservationService {
    /// Creates a new mock reservation service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn SeatReservationService> {
        Arc::new(Self::new())
    }
}

impl SeatReservationService for MockSeatReservationService {
    fn reserve_seats(
        &self,
        account_id: AccountId,
        seat_count: u32,
    ) -> Result<ReservationReceipt, ReservationError> {
        let reference = format!("RESERVATION-REF-{}", uuid::Uuid::new_v4());

        tracing::info!(
            account_id = account_id.get(),
            seat_count,
            reference = %reference,
            "Mock seats reserved successfully"
        );

        Ok(ReservationReceipt { reference })
    }
}
