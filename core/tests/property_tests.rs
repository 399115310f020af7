//! Property tests for batch validation and aggregation.

#![allow(clippy::unwrap_used)]

use cinema_tickets_core::{
    Money, PurchaseError, PurchasePolicy, TicketService, TicketType, TicketTypeRequest,
};
use cinema_tickets_testing::mocks::{RecordingPaymentService, RecordingSeatReservationService};
use cinema_tickets_testing::properties::{
    adultless_batch, oversized_batch, request, total_tickets, valid_batch,
};
use proptest::prelude::*;

fn count_of(batch: &[TicketTypeRequest], ticket_type: TicketType) -> u32 {
    batch
        .iter()
        .filter(|r| r.ticket_type() == ticket_type)
        .map(TicketTypeRequest::count)
        .sum()
}

proptest! {
    #[test]
    fn oversized_batches_always_exceed_limit(batch in oversized_batch()) {
        let err = PurchasePolicy::STANDARD.validate(&batch).unwrap_err();
        let is_limit_error = matches!(err, PurchaseError::TicketLimitExceeded { .. });
        prop_assert!(is_limit_error);
    }

    #[test]
    fn adultless_batches_always_need_an_adult(batch in adultless_batch()) {
        let err = PurchasePolicy::STANDARD.validate(&batch).unwrap_err();
        let is_adult_error = matches!(err, PurchaseError::AdultRequired { .. });
        prop_assert!(is_adult_error);
    }

    #[test]
    fn valid_batches_price_and_seat_correctly(batch in valid_batch()) {
        let payments = RecordingPaymentService::shared();
        let reservations = RecordingSeatReservationService::shared();
        let service = TicketService::new(payments.clone(), reservations.clone());

        let outcome = service.purchase_tickets(42, &batch).unwrap();

        let adults = count_of(&batch, TicketType::Adult);
        let children = count_of(&batch, TicketType::Child);
        let infants = count_of(&batch, TicketType::Infant);
        let total = u32::try_from(total_tickets(&batch)).unwrap();

        prop_assert_eq!(outcome.seat_count, total - infants);
        prop_assert_eq!(
            outcome.total_amount,
            Money::from_pounds(u64::from(20 * adults + 10 * children))
        );
        prop_assert_eq!(payments.calls().len(), 1);
        prop_assert_eq!(reservations.calls()[0].1, outcome.seat_count);
    }

    #[test]
    fn any_zero_count_is_rejected(
        mut batch in valid_batch(),
        position in any::<prop::sample::Index>(),
        ticket_type in cinema_tickets_testing::properties::ticket_type(),
    ) {
        let index = position.index(batch.len() + 1);
        batch.insert(index, TicketTypeRequest::new(ticket_type, 0));

        let err = PurchasePolicy::STANDARD.validate(&batch).unwrap_err();
        let is_count_error = matches!(err, PurchaseError::InvalidTicketCount { .. });
        prop_assert!(is_count_error);
    }

    #[test]
    fn rejected_batches_cause_no_side_effects(
        batch in prop::collection::vec(request(15), 0..4),
    ) {
        let payments = RecordingPaymentService::shared();
        let reservations = RecordingSeatReservationService::shared();
        let service = TicketService::new(payments.clone(), reservations.clone());

        if service.purchase_tickets(7, &batch).is_err() {
            prop_assert!(payments.calls().is_empty());
            prop_assert!(reservations.calls().is_empty());
        }
    }
}
