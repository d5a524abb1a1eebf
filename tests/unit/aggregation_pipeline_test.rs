// Property tests for the aggregation pipeline

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use toll_analytics::analytics::models::Direction;
use toll_analytics::analytics::services::aggregation::{self, Bucket};

fn cabin_buckets() -> impl Strategy<Value = Vec<Bucket<i64>>> {
    prop::collection::vec((1i64..20, 0i64..100_000), 0..12).prop_map(|pairs| {
        aggregation::merge_by_key(
            pairs
                .into_iter()
                .map(|(cabin, count)| (cabin, Decimal::from(count))),
        )
    })
}

fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64, 0u32..3).prop_map(|(units, scale)| Decimal::new(units, scale))
}

proptest! {
    #[test]
    fn prop_shares_sum_to_one_hundred(buckets in cabin_buckets()) {
        let shared = aggregation::with_shares(&buckets);
        let total = aggregation::total(&buckets);
        let sum: Decimal = shared.iter().map(|bucket| bucket.share).sum();

        if total.is_zero() {
            prop_assert!(shared.iter().all(|bucket| bucket.share.is_zero()));
        } else {
            prop_assert!((sum - Decimal::ONE_HUNDRED).abs() < dec!(0.000001));
        }
    }

    #[test]
    fn prop_percent_change_is_exact(current in amount(), previous in amount()) {
        match aggregation::percent_change(current, previous) {
            None => prop_assert!(previous.is_zero()),
            Some(change) => {
                prop_assert!(!previous.is_zero());
                prop_assert_eq!(change, (current - previous) / previous * Decimal::ONE_HUNDRED);
            }
        }
    }

    /// Rankings are ordered by value and never longer than asked for
    #[test]
    fn prop_rankings_are_ordered(buckets in cabin_buckets(), n in 0usize..8) {
        let top = aggregation::top_n(&buckets, n);
        let bottom = aggregation::bottom_n(&buckets, n);

        prop_assert_eq!(top.len(), n.min(buckets.len()));
        prop_assert!(top.windows(2).all(|pair| pair[0].value >= pair[1].value));
        prop_assert!(bottom.windows(2).all(|pair| pair[0].value <= pair[1].value));

        if let (Some(first), Some(peak)) = (top.first(), aggregation::peak(&buckets)) {
            prop_assert_eq!(first.value, peak.value);
        }
    }

    /// Merged keys are unique and ascending
    #[test]
    fn prop_merge_keeps_keys_unique(pairs in prop::collection::vec((0i64..10, 0i64..50), 0..40)) {
        let expected: Decimal = pairs.iter().map(|(_, value)| Decimal::from(*value)).sum();
        let merged = aggregation::merge_by_key(
            pairs.into_iter().map(|(key, value)| (key, Decimal::from(value))),
        );

        prop_assert!(merged.windows(2).all(|pair| pair[0].key < pair[1].key));
        prop_assert_eq!(aggregation::total(&merged), expected);
    }
}

#[test]
fn test_cabin_share_scenario() {
    let buckets = vec![Bucket::new(1i64, dec!(70)), Bucket::new(2, dec!(30))];

    let shared = aggregation::with_shares(&buckets);
    assert_eq!(shared[0].share, dec!(70));
    assert_eq!(shared[1].share, dec!(30));
    assert_eq!(aggregation::peak(&buckets).map(|bucket| bucket.key), Some(1));
    assert_eq!(aggregation::top_n(&buckets, 1), vec![Bucket::new(1, dec!(70))]);
}

#[test]
fn test_trend_scenarios() {
    let up = aggregation::trend(dec!(120), dec!(100));
    assert_eq!(up.percent_change, Some(dec!(20)));
    assert_eq!(up.direction, Direction::Up);
    assert_eq!(up.summary, "↗ 20.0% more than the previous period");

    let no_base = aggregation::trend(dec!(50), Decimal::ZERO);
    assert_eq!(no_base.percent_change, None);
    assert_eq!(no_base.direction, Direction::Flat);
    assert_eq!(no_base.summary, "insufficient data to compare.");
}

#[test]
fn test_hourly_series_is_dense() {
    let series = aggregation::hourly_series(&[Bucket::new(23, dec!(4)), Bucket::new(24, dec!(9))]);
    assert_eq!(series.len(), 24);
    assert_eq!(series[23].label, "23:00");
    assert_eq!(aggregation::total(
        &series.iter().map(|slot| Bucket::new(slot.hour, slot.value)).collect::<Vec<_>>()
    ), dec!(4));
}
