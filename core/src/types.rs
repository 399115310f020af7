//! Domain types for cinema ticket purchases.
//!
//! Value objects only: ticket categories, ticket requests, account identifiers,
//! money and the outcome of a completed purchase. Fallible constructors here are
//! the string/integer boundary; everything downstream works with validated types.

use crate::error::PurchaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of the account paying for a purchase.
///
/// Always a positive integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(u64);

impl AccountId {
    /// Creates an `AccountId` from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::InvalidAccount`] if `id` is zero or negative.
    pub fn new(id: i64) -> Result<Self, PurchaseError> {
        u64::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| PurchaseError::InvalidAccount {
                value: id.to_string(),
            })
    }

    /// Returns the inner integer
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for AccountId {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PurchaseError::InvalidAccount {
            value: s.to_string(),
        };
        let id: i64 = s.trim().parse().map_err(|_| invalid())?;
        Self::new(id).map_err(|_| invalid())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount of money in whole pounds.
///
/// Ticket prices are integral, so no fractional unit is carried.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero pounds
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` amount from whole pounds
    #[must_use]
    pub const fn from_pounds(pounds: u64) -> Self {
        Self(pounds)
    }

    /// Returns the amount in whole pounds
    #[must_use]
    pub const fn pounds(&self) -> u64 {
        self.0
    }

    /// Checks if this amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a ticket count, returning `None` on overflow
    #[must_use]
    pub const fn checked_mul(self, count: u32) -> Option<Self> {
        match self.0.checked_mul(count as u64) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", self.0)
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// Ticket category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketType {
    /// Under 2s. Free, and sits on an adult's lap.
    Infant,
    /// Under 16s
    Child,
    /// Everyone else
    Adult,
}

impl TicketType {
    /// All ticket types, in price order
    pub const ALL: [Self; 3] = [Self::Infant, Self::Child, Self::Adult];

    /// Canonical upper-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infant => "INFANT",
            Self::Child => "CHILD",
            Self::Adult => "ADULT",
        }
    }

    /// Whether a ticket of this type needs its own seat
    #[must_use]
    pub const fn occupies_seat(&self) -> bool {
        !matches!(self, Self::Infant)
    }
}

impl FromStr for TicketType {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|ticket_type| ticket_type.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| PurchaseError::InvalidTicketType {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for some number of tickets of one type.
///
/// Immutable once built. A zero count can be represented here and is rejected
/// when the batch is validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    count: u32,
}

impl TicketTypeRequest {
    /// Creates a new ticket request
    #[must_use]
    pub const fn new(ticket_type: TicketType, count: u32) -> Self {
        Self { ticket_type, count }
    }

    /// Builds a request from untyped input.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::InvalidTicketType`] if `ticket_type` is not a known category
    /// - [`PurchaseError::InvalidTicketCount`] if `count` is not a non-negative integer
    pub fn parse(ticket_type: &str, count: &str) -> Result<Self, PurchaseError> {
        let ticket_type: TicketType = ticket_type.parse()?;
        let count = count
            .trim()
            .parse::<u32>()
            .map_err(|_| PurchaseError::InvalidTicketCount {
                ticket_type,
                value: count.to_string(),
            })?;
        Ok(Self::new(ticket_type, count))
    }

    /// Ticket category requested
    #[must_use]
    pub const fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    /// Number of tickets requested
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// Parses `TYPE:COUNT` or `TYPE=COUNT`, e.g. `ADULT:2`.
impl FromStr for TicketTypeRequest {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ticket_type, count) =
            s.split_once([':', '=']).ok_or_else(|| PurchaseError::InvalidTicketType {
                value: s.to_string(),
            })?;
        Self::parse(ticket_type, count)
    }
}

impl fmt::Display for TicketTypeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ticket_type, self.count)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    /// Always true; failures are reported as errors instead
    pub success: bool,
    /// Amount charged to the account
    pub total_amount: Money,
    /// Seats reserved (infants excluded)
    pub seat_count: u32,
    /// Reference returned by the payment collaborator
    pub payment_reference: String,
    /// Reference returned by the reservation collaborator
    pub reservation_reference: String,
}
