//! Cinema ticket purchase demo.
//!
//! Purchases tickets against the mock payment and seat reservation services and
//! prints the outcome as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Two adults, two children, two infants for account 123
//! cargo run --bin cinema-tickets-demo
//!
//! # Custom purchase: <account-id> <TYPE:COUNT>...
//! cargo run --bin cinema-tickets-demo -- 42 ADULT:1 CHILD:3
//!
//! # An account with no tickets is an empty purchase and is rejected
//! cargo run --bin cinema-tickets-demo -- 42
//!
//! # Tighter limit via configuration
//! TICKETS_MAX_PER_PURCHASE=4 cargo run --bin cinema-tickets-demo
//! ```

use anyhow::Context;
use cinema_tickets_core::config::DEFAULT_LOG_FILTER;
use cinema_tickets_core::{
    AccountId, Config, MockPaymentGateway, MockSeatReservationService, PurchaseError,
    TicketService, TicketType, TicketTypeRequest,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ACCOUNT: &str = "123";

fn main() -> ExitCode {
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Validation failures are the caller's fault; anything else is reported with its cause chain.
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PurchaseError>() {
        Some(purchase) if purchase.is_validation() => {
            format!("Invalid purchase request: {purchase}")
        }
        _ => format!("An error occurred while purchasing tickets: {err:#}"),
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let (account_id, requests) = parse_args(std::env::args().skip(1))?;

    tracing::info!(
        %account_id,
        requests = ?requests.iter().map(ToString::to_string).collect::<Vec<_>>(),
        max_tickets = config.tickets.max_per_purchase,
        "Purchasing tickets"
    );

    let service = TicketService::from_config(
        config,
        MockPaymentGateway::shared(),
        MockSeatReservationService::shared(),
    );

    let outcome = service.purchase(account_id, &requests)?;

    let json = serde_json::to_string_pretty(&outcome).context("Failed to render outcome")?;
    println!("{json}");
    println!("Tickets purchased successfully!");

    Ok(())
}

/// Parses `[account-id] [TYPE:COUNT]...`.
///
/// With no arguments at all the family demo batch is bought for the default
/// account. Once an account id is given the requests are taken as supplied, so
/// an account alone is an empty batch.
fn parse_args(
    args: impl Iterator<Item = String>,
) -> Result<(AccountId, Vec<TicketTypeRequest>), PurchaseError> {
    let args: Vec<String> = args.collect();
    let Some((account_id, requests)) = args.split_first() else {
        return Ok((
            DEFAULT_ACCOUNT.parse()?,
            vec![
                TicketTypeRequest::new(TicketType::Adult, 2),
                TicketTypeRequest::new(TicketType::Child, 2),
                TicketTypeRequest::new(TicketType::Infant, 2),
            ],
        ));
    };

    let account_id: AccountId = account_id.parse()?;
    let requests = requests
        .iter()
        .map(|arg| arg.parse())
        .collect::<Result<Vec<TicketTypeRequest>, _>>()?;

    Ok((account_id, requests))
}
