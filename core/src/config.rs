//! Configuration management for the ticket service.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::pricing::{MAX_TICKETS_PER_PURCHASE, PriceTable, PurchasePolicy};
use crate::types::{Money, TicketType};
use serde::{Deserialize, Serialize};
use std::env;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,cinema_tickets_core=debug";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Purchase rules
    pub tickets: TicketsConfig,
    /// Log filter (trace, debug, info, warn, error or an `EnvFilter` directive)
    pub log_level: String,
}

/// Ticket pricing and limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketsConfig {
    /// Maximum tickets in one purchase
    pub max_per_purchase: u32,
    /// Infant ticket price in pounds
    pub infant_price: u64,
    /// Child ticket price in pounds
    pub child_price: u64,
    /// Adult ticket price in pounds
    pub adult_price: u64,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        let prices = PriceTable::STANDARD;
        Self {
            max_per_purchase: MAX_TICKETS_PER_PURCHASE,
            infant_price: prices.price(TicketType::Infant).pounds(),
            child_price: prices.price(TicketType::Child).pounds(),
            adult_price: prices.price(TicketType::Adult).pounds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickets: TicketsConfig::default(),
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the standard values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = TicketsConfig::default();
        Self {
            tickets: TicketsConfig {
                max_per_purchase: lookup("TICKETS_MAX_PER_PURCHASE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_per_purchase),
                infant_price: lookup("TICKETS_PRICE_INFANT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.infant_price),
                child_price: lookup("TICKETS_PRICE_CHILD")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.child_price),
                adult_price: lookup("TICKETS_PRICE_ADULT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.adult_price),
            },
            log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Build the immutable purchase policy described by this configuration
    #[must_use]
    pub const fn policy(&self) -> PurchasePolicy {
        PurchasePolicy::new(
            PriceTable::new(
                Money::from_pounds(self.tickets.infant_price),
                Money::from_pounds(self.tickets.child_price),
                Money::from_pounds(self.tickets.adult_price),
            ),
            self.tickets.max_per_purchase,
        )
    }
}
