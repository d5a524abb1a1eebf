//! Pure reductions over grouped measures.
//!
//! Everything here works on already-fetched buckets, so domains can run the
//! same pipeline over whatever their row source returned.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::core::calendar;
use crate::modules::analytics::models::{ComparisonResult, Direction};

/// A measure value attached to one dimension key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub value: Decimal,
}

impl<K> Bucket<K> {
    pub fn new(key: K, value: Decimal) -> Self {
        Self { key, value }
    }
}

/// Bucket with its percentage of the grand total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedBucket<K> {
    pub key: K,
    pub value: Decimal,
    pub share: Decimal,
}

pub fn total<K>(buckets: &[Bucket<K>]) -> Decimal {
    buckets.iter().map(|bucket| bucket.value).sum()
}

/// Percentage of `total`; a zero total yields a zero share
pub fn share(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    value / total * Decimal::ONE_HUNDRED
}

pub fn with_shares<K: Clone>(buckets: &[Bucket<K>]) -> Vec<SharedBucket<K>> {
    let grand_total = total(buckets);
    buckets
        .iter()
        .map(|bucket| SharedBucket {
            key: bucket.key.clone(),
            value: bucket.value,
            share: share(bucket.value, grand_total),
        })
        .collect()
}

/// Mean per item; zero items yields zero
pub fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count as u64)
}

/// Whole count carried in a decimal measure
pub fn count_of(value: Decimal) -> i64 {
    value.trunc().to_i64().unwrap_or_default()
}

/// Highest bucket; ties keep the first one encountered
pub fn peak<K>(buckets: &[Bucket<K>]) -> Option<&Bucket<K>> {
    buckets.iter().fold(None, |best, bucket| match best {
        Some(current) if current.value >= bucket.value => Some(current),
        _ => Some(bucket),
    })
}

/// Lowest bucket; ties keep the first one encountered
pub fn trough<K>(buckets: &[Bucket<K>]) -> Option<&Bucket<K>> {
    buckets.iter().fold(None, |best, bucket| match best {
        Some(current) if current.value <= bucket.value => Some(current),
        _ => Some(bucket),
    })
}

/// `n` highest buckets, descending; ties keep input order
pub fn top_n<K: Clone>(buckets: &[Bucket<K>], n: usize) -> Vec<Bucket<K>> {
    let mut ranked = buckets.to_vec();
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(n);
    ranked
}

/// `n` lowest buckets, ascending; ties keep input order
pub fn bottom_n<K: Clone>(buckets: &[Bucket<K>], n: usize) -> Vec<Bucket<K>> {
    let mut ranked = buckets.to_vec();
    ranked.sort_by(|a, b| a.value.cmp(&b.value));
    ranked.truncate(n);
    ranked
}

/// Sum values sharing a key. Output keys are unique and ascending.
pub fn merge_by_key<K, I>(pairs: I) -> Vec<Bucket<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, Decimal)>,
{
    let mut merged: BTreeMap<K, Decimal> = BTreeMap::new();
    for (key, value) in pairs {
        *merged.entry(key).or_insert(Decimal::ZERO) += value;
    }
    merged
        .into_iter()
        .map(|(key, value)| Bucket::new(key, value))
        .collect()
}

/// One slot of a 24-hour series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourSlot {
    pub hour: i64,
    pub label: String,
    pub value: Decimal,
}

/// Dense 0..=23 series; hours without data read as zero and out-of-range
/// hours are dropped
pub fn hourly_series(buckets: &[Bucket<i64>]) -> Vec<HourSlot> {
    let mut values = [Decimal::ZERO; 24];
    for bucket in buckets {
        if let Some(slot) = usize::try_from(bucket.key).ok().and_then(|h| values.get_mut(h)) {
            *slot += bucket.value;
        }
    }
    values
        .iter()
        .enumerate()
        .map(|(hour, value)| HourSlot {
            hour: hour as i64,
            label: calendar::format_hour_label(hour as i64),
            value: *value,
        })
        .collect()
}

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Label for a 1 = Sunday .. 7 = Saturday weekday number
pub fn weekday_label(weekday: i64) -> Option<&'static str> {
    usize::try_from(weekday - 1)
        .ok()
        .and_then(|index| WEEKDAY_LABELS.get(index))
        .copied()
}

/// How a classification rule matches a raw category value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    Exact(String),
    Prefix(String),
}

impl MatchRule {
    fn matches(&self, value: &str) -> bool {
        match self {
            MatchRule::Exact(expected) => value == expected,
            MatchRule::Prefix(prefix) => value.starts_with(prefix.as_str()),
        }
    }
}

/// Ordered rules mapping raw values to classes; first match wins, anything
/// unmatched falls into the fallback class
#[derive(Debug, Clone)]
pub struct ClassificationTable<C> {
    rules: Vec<(MatchRule, C)>,
    fallback: C,
}

impl<C: Copy> ClassificationTable<C> {
    pub fn new(fallback: C) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn exact(mut self, value: impl Into<String>, class: C) -> Self {
        self.rules.push((MatchRule::Exact(value.into()), class));
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>, class: C) -> Self {
        self.rules.push((MatchRule::Prefix(prefix.into()), class));
        self
    }

    pub fn classify(&self, value: &str) -> C {
        let value = value.trim();
        self.rules
            .iter()
            .find(|(rule, _)| rule.matches(value))
            .map(|(_, class)| *class)
            .unwrap_or(self.fallback)
    }
}

/// Classify each `(key, raw, value)` and sum per `(key, class)`
pub fn fold_classified<K, C, I, S>(
    rows: I,
    table: &ClassificationTable<C>,
) -> Vec<Bucket<(K, C)>>
where
    K: Ord,
    C: Ord + Copy,
    S: AsRef<str>,
    I: IntoIterator<Item = (K, S, Decimal)>,
{
    merge_by_key(
        rows.into_iter()
            .map(|(key, raw, value)| ((key, table.classify(raw.as_ref())), value)),
    )
}

/// Percentage change from `previous` to `current`; undefined for a zero base
pub fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some((current - previous) / previous * Decimal::ONE_HUNDRED)
}

pub fn direction(percent: Option<Decimal>) -> Direction {
    match percent {
        Some(value) if value.is_sign_positive() && !value.is_zero() => Direction::Up,
        Some(value) if value.is_sign_negative() && !value.is_zero() => Direction::Down,
        _ => Direction::Flat,
    }
}

/// Human-readable footer, e.g. `↗ 20.0% more than the previous period`
pub fn summary_text(percent: Option<Decimal>) -> String {
    let Some(percent) = percent else {
        return "insufficient data to compare.".to_string();
    };

    let direction = direction(Some(percent));
    let magnitude = percent
        .abs()
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let joiner = match direction {
        Direction::Flat => "as",
        _ => "than",
    };

    format!(
        "{} {:.1}% {} {} the previous period",
        direction.glyph(),
        magnitude,
        direction.qualifier(),
        joiner
    )
}

/// Trend descriptor between two period totals
pub fn trend(current: Decimal, previous: Decimal) -> ComparisonResult {
    let percent = percent_change(current, previous);
    ComparisonResult {
        current_total: current,
        previous_total: previous,
        percent_change: percent,
        direction: direction(percent),
        summary: summary_text(percent),
    }
}
