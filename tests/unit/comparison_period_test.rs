// Property tests for previous-period derivation

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use toll_analytics::analytics::models::{DateBounds, RangeToken, TimeWindow};
use toll_analytics::analytics::services::{ComparisonPeriodCalculator, RangeResolver};

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (1_000_000_000i64..2_000_000_000i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

proptest! {
    /// Named windows: the previous one ends one tick before the current one
    /// starts, and rolling windows keep their length
    #[test]
    fn prop_named_previous_is_adjacent(
        token in prop::sample::select(RangeToken::ALL.to_vec()),
        now in instant(),
    ) {
        let current = RangeResolver::resolve(token, now).unwrap();
        let previous = ComparisonPeriodCalculator::previous(&current, Some(token)).unwrap();

        prop_assert_eq!(previous.until + Duration::milliseconds(1), current.from);
        if token != RangeToken::LastMonth {
            prop_assert_eq!(previous.duration(), current.duration());
        }
    }

    /// Custom windows shift by their own duration
    #[test]
    fn prop_custom_previous_is_adjacent(
        from in instant(),
        span_secs in 0i64..(400 * 86_400),
    ) {
        let current = TimeWindow::new(from, from + Duration::seconds(span_secs)).unwrap();
        let previous = ComparisonPeriodCalculator::previous(&current, None).unwrap();

        prop_assert_eq!(previous.until + Duration::milliseconds(1), current.from);
        prop_assert_eq!(previous.duration(), current.duration());
        prop_assert!(previous.until < current.from);
    }
}

#[test]
fn test_last_month_previous_is_whole_month() {
    let now = utc(2025, 6, 20, 9, 0, 0);
    let current = RangeResolver::resolve(RangeToken::LastMonth, now).unwrap();
    let previous =
        ComparisonPeriodCalculator::previous(&current, Some(RangeToken::LastMonth)).unwrap();

    assert_eq!(previous.from, utc(2025, 4, 1, 0, 0, 0));
    assert_eq!(
        previous.until,
        utc(2025, 4, 30, 23, 59, 59) + Duration::milliseconds(999)
    );
}

#[test]
fn test_last_month_previous_wraps_year() {
    let now = utc(2025, 2, 10, 0, 0, 0);
    let current = RangeResolver::resolve(RangeToken::LastMonth, now).unwrap();
    let previous =
        ComparisonPeriodCalculator::previous(&current, Some(RangeToken::LastMonth)).unwrap();

    assert_eq!(previous.from, utc(2024, 12, 1, 0, 0, 0));
}

#[test]
fn test_half_open_bounds_skip_comparison() {
    let bounds = DateBounds::new(Some(utc(2025, 1, 1, 0, 0, 0)), None);
    assert!(ComparisonPeriodCalculator::previous_for_bounds(&bounds, None)
        .unwrap()
        .is_none());
    assert!(
        ComparisonPeriodCalculator::previous_for_bounds(&DateBounds::default(), None)
            .unwrap()
            .is_none()
    );
}
