//! Prices and purchase rules.
//!
//! [`PurchasePolicy`] holds everything the validator needs to decide whether a
//! batch is acceptable: the price of each ticket type and the per-purchase
//! ticket limit. Both are immutable once built.
//!
//! # Validation order
//!
//! ```text
//! 1. batch empty?                      → EmptyPurchase
//! 2. for each request, in batch order:
//!    a. count < 1?                     → InvalidTicketCount(type)
//!    b. non-adult and no adult present → AdultRequired(type)
//! 3. total tickets > max?              → TicketLimitExceeded
//! 4. price total overflows?            → AmountOverflow
//! ```
//!
//! Adult presence is computed once for the batch before step 2.

use crate::error::PurchaseError;
use crate::types::{Money, TicketType, TicketTypeRequest};
use serde::{Deserialize, Serialize};

/// Maximum number of tickets in a single purchase.
pub const MAX_TICKETS_PER_PURCHASE: u32 = 20;

/// Unit price of each ticket type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    infant: Money,
    child: Money,
    adult: Money,
}

impl PriceTable {
    /// Standard prices: infants free, children £10, adults £20.
    pub const STANDARD: Self = Self::new(
        Money::from_pounds(0),
        Money::from_pounds(10),
        Money::from_pounds(20),
    );

    /// Creates a custom price table
    #[must_use]
    pub const fn new(infant: Money, child: Money, adult: Money) -> Self {
        Self {
            infant,
            child,
            adult,
        }
    }

    /// Unit price for a ticket type
    #[must_use]
    pub const fn price(&self, ticket_type: TicketType) -> Money {
        match ticket_type {
            TicketType::Infant => self.infant,
            TicketType::Child => self.child,
            TicketType::Adult => self.adult,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Totals derived from a validated batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    /// Adult tickets in the batch
    pub adults: u32,
    /// Child tickets in the batch
    pub children: u32,
    /// Infant tickets in the batch
    pub infants: u32,
    /// Amount to charge
    pub total_amount: Money,
    /// Seats to reserve
    pub seat_count: u32,
}

impl PurchaseSummary {
    /// Total tickets across all types
    #[must_use]
    pub const fn total_tickets(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// Business rules applied to every purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasePolicy {
    prices: PriceTable,
    max_tickets: u32,
}

impl PurchasePolicy {
    /// Standard prices with a limit of [`MAX_TICKETS_PER_PURCHASE`].
    pub const STANDARD: Self = Self::new(PriceTable::STANDARD, MAX_TICKETS_PER_PURCHASE);

    /// Creates a policy from a price table and ticket limit
    #[must_use]
    pub const fn new(prices: PriceTable, max_tickets: u32) -> Self {
        Self {
            prices,
            max_tickets,
        }
    }

    /// Price table in force
    #[must_use]
    pub const fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Maximum tickets per purchase
    #[must_use]
    pub const fn max_tickets(&self) -> u32 {
        self.max_tickets
    }

    /// Validates a batch and computes what it costs and how many seats it needs.
    ///
    /// Pure: no collaborator is involved.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::EmptyPurchase`] if `requests` is empty
    /// - [`PurchaseError::InvalidTicketCount`] for the first request with a zero count
    /// - [`PurchaseError::AdultRequired`] for the first non-adult request when the
    ///   batch has no adult request
    /// - [`PurchaseError::TicketLimitExceeded`] if the total exceeds the limit
    /// - [`PurchaseError::AmountOverflow`] if the price total cannot be represented
    pub fn validate(&self, requests: &[TicketTypeRequest]) -> Result<PurchaseSummary, PurchaseError> {
        if requests.is_empty() {
            return Err(PurchaseError::EmptyPurchase);
        }

        let has_adult = requests
            .iter()
            .any(|request| request.ticket_type() == TicketType::Adult);

        for request in requests {
            let ticket_type = request.ticket_type();
            if request.count() < 1 {
                return Err(PurchaseError::InvalidTicketCount {
                    ticket_type,
                    value: request.count().to_string(),
                });
            }
            if ticket_type != TicketType::Adult && !has_adult {
                return Err(PurchaseError::AdultRequired { ticket_type });
            }
        }

        // u64 so a pathological batch cannot wrap before the limit check.
        let requested: u64 = requests.iter().map(|r| u64::from(r.count())).sum();
        if requested > u64::from(self.max_tickets) {
            return Err(PurchaseError::TicketLimitExceeded {
                requested,
                max: self.max_tickets,
            });
        }

        self.summarize(requests)
    }

    // Only called once the total is known to be within `max_tickets`.
    fn summarize(&self, requests: &[TicketTypeRequest]) -> Result<PurchaseSummary, PurchaseError> {
        requests
            .iter()
            .try_fold(PurchaseSummary::default(), |mut summary, request| {
                let count = request.count();
                let ticket_type = request.ticket_type();
                match ticket_type {
                    TicketType::Infant => summary.infants += count,
                    TicketType::Child => summary.children += count,
                    TicketType::Adult => summary.adults += count,
                }
                if ticket_type.occupies_seat() {
                    summary.seat_count += count;
                }
                summary.total_amount = self
                    .prices
                    .price(ticket_type)
                    .checked_mul(count)
                    .and_then(|line| summary.total_amount.checked_add(line))
                    .ok_or(PurchaseError::AmountOverflow)?;
                Ok(summary)
            })
    }
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
