// Property tests for range token resolution

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use proptest::prelude::*;
use toll_analytics::analytics::models::{RangeSelector, RangeToken};
use toll_analytics::analytics::services::RangeResolver;
use toll_analytics::core::AppError;

// 2001-09-09 .. 2033-05-18
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (1_000_000_000i64..2_000_000_000i64, 0u32..1000)
        .prop_map(|(secs, millis)| Utc.timestamp_opt(secs, millis * 1_000_000).unwrap())
}

fn token() -> impl Strategy<Value = RangeToken> {
    prop::sample::select(RangeToken::ALL.to_vec())
}

fn is_month_start(instant: DateTime<Utc>) -> bool {
    instant.day() == 1
        && instant.hour() == 0
        && instant.minute() == 0
        && instant.second() == 0
        && instant.nanosecond() == 0
}

proptest! {
    /// Rolling tokens span exactly their nominal length and end at `now`;
    /// month tokens start on a month boundary
    #[test]
    fn prop_resolved_window_shape(token in token(), now in instant()) {
        let window = RangeResolver::resolve(token, now).unwrap();
        prop_assert!(window.from <= window.until);

        match token.rolling_days() {
            Some(days) => {
                prop_assert_eq!(window.until, now);
                prop_assert_eq!(window.duration(), Duration::days(days));
            }
            None => {
                prop_assert!(is_month_start(window.from));
            }
        }
    }

    #[test]
    fn prop_current_month_ends_now(now in instant()) {
        let window = RangeResolver::resolve(RangeToken::CurrentMonth, now).unwrap();
        prop_assert_eq!(window.until, now);
        prop_assert_eq!(window.from.month(), now.month());
        prop_assert_eq!(window.from.year(), now.year());
    }

    #[test]
    fn prop_last_month_ends_before_this_month(now in instant()) {
        let window = RangeResolver::resolve(RangeToken::LastMonth, now).unwrap();
        let next = window.until + Duration::milliseconds(1);
        prop_assert!(is_month_start(next));
        prop_assert_eq!((next.year(), next.month()), (now.year(), now.month()));
    }

    /// Every spelling round-trips through the canonical display form
    #[test]
    fn prop_selector_display_round_trips(token in token(), compare in any::<bool>()) {
        let selector = RangeSelector::new(token, compare);
        let parsed: RangeSelector = selector.to_string().parse().unwrap();
        prop_assert_eq!(parsed, selector);
    }

    #[test]
    fn prop_unknown_tokens_are_rejected(raw in "[a-z]{1,6}[0-9]{0,3}") {
        prop_assume!(raw.parse::<RangeToken>().is_err());
        let result = RangeResolver::resolve_str(&raw, Utc::now());
        prop_assert!(matches!(result, Err(AppError::UnknownRangeToken(_))));
    }
}

#[test]
fn test_last_7_days_scenario() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let window = RangeResolver::resolve(RangeToken::Last7d, now).unwrap();

    assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 6, 8, 12, 0, 0).unwrap());
    assert_eq!(window.until, now);
}

#[test]
fn test_last_month_scenario() {
    let now = Utc.with_ymd_and_hms(2025, 6, 3, 8, 30, 0).unwrap();
    let window = RangeResolver::resolve(RangeToken::LastMonth, now).unwrap();

    assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
    assert_eq!(
        window.until,
        Utc.with_ymd_and_hms(2025, 5, 31, 23, 59, 59).unwrap() + Duration::milliseconds(999)
    );
}

#[test]
fn test_legacy_spellings() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let (selector, _) = RangeResolver::resolve_str("ultimoMesAnterior", now).unwrap();
    assert_eq!(selector, RangeSelector::new(RangeToken::LastMonth, true));

    let (selector, window) = RangeResolver::resolve_str("ultimos15d", now).unwrap();
    assert!(!selector.compare);
    assert_eq!(window.duration(), Duration::days(15));
}
