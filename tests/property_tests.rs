//! Property-based tests for the dashboard and billing arithmetic.

use poultry_ops::{
    breeds::{match_breed, CANONICAL_BREEDS},
    models::StockBatch,
    pricing::{bill_total, parse_lenient_f64},
    services::{StockFilter, StockSummary},
};
use proptest::prelude::*;

fn breed_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Broiler".to_string())),
        Just(Some("country chicken mix".to_string())),
        Just(Some("Kadaknath".to_string())),
        Just(Some("Aseel".to_string())),
        "[A-Za-z ]{0,12}".prop_map(Some),
    ]
}

fn batch_strategy() -> impl Strategy<Value = StockBatch> {
    (1i64..10_000, breed_strategy(), 0i64..5_000, 0i64..5_000, 0u32..100_000).prop_map(
        |(id, breed, total, available, weight)| StockBatch {
            id,
            batch_code: format!("B{}", id),
            breed,
            total_hens: total,
            available_hens: available,
            weight: weight as f64 / 10.0,
            date_created: None,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn total_birds_is_sum_of_available(batches in prop::collection::vec(batch_strategy(), 0..40)) {
        let summary = StockSummary::from_batches(&batches);
        let expected: i64 = batches.iter().map(|b| b.available_hens).sum();

        prop_assert_eq!(summary.display(&StockFilter::All).birds, expected);

        let bucketed: i64 = summary.breeds.iter().map(|(_, totals)| totals.birds).sum();
        prop_assert_eq!(bucketed, expected);
    }

    #[test]
    fn canonical_buckets_are_always_present(batches in prop::collection::vec(batch_strategy(), 0..10)) {
        let summary = StockSummary::from_batches(&batches);
        let labels: Vec<&str> = summary.breed_labels().take(CANONICAL_BREEDS.len()).collect();
        prop_assert_eq!(labels, CANONICAL_BREEDS.to_vec());
    }

    #[test]
    fn bill_total_is_rounded_product(weight in 0u32..1_000_000, price in 0u32..100_000) {
        let weight_text = format!("{}.{}", weight / 10, weight % 10);
        let price_text = format!("{}.{:02}", price / 100, price % 100);

        let expected = (parse_lenient_f64(&weight_text) * parse_lenient_f64(&price_text)).round() as i64;
        prop_assert_eq!(bill_total(&weight_text, &price_text), expected);
    }

    #[test]
    fn unreadable_bill_inputs_count_as_zero(garbage in "[a-zA-Z ]{0,8}", price in 0u32..10_000) {
        prop_assert_eq!(bill_total(&garbage, &price.to_string()), 0);
        prop_assert_eq!(bill_total("NaN", &price.to_string()), 0);
    }

    #[test]
    fn matched_breeds_are_canonical(raw in "[A-Za-z ()]{0,20}") {
        if let Some(label) = match_breed(&raw) {
            prop_assert!(CANONICAL_BREEDS.contains(&label));
        }
    }
}
