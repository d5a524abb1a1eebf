use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{calendar, Result};
use crate::modules::analytics::models::location::plaza_name_for;
use crate::modules::analytics::models::{
    DomainPolicy, Field, FilterSpecification, GroupKey, GroupedQuery, GroupedRow, Measure,
    NormalizedSpec, Predicate, RangeToken, Scope,
};
use crate::modules::analytics::repositories::RowSource;
use crate::modules::analytics::services::aggregation::{self, Bucket};
use crate::modules::analytics::services::{ReportDomain, ReportOrchestrator};
use crate::modules::transits::models::{DailyHours, HourCount, TransitRecord, TransitSummary};

/// Lane transit report
pub struct TransitReport {
    policy: DomainPolicy,
    source: Arc<dyn RowSource<TransitRecord>>,
}

pub type TransitService = ReportOrchestrator<TransitReport>;

impl TransitReport {
    pub fn new(source: Arc<dyn RowSource<TransitRecord>>) -> Self {
        Self {
            policy: Self::default_policy(),
            source,
        }
    }

    /// Last calendar month by default, pages up to 50 000 rows
    pub fn default_policy() -> DomainPolicy {
        DomainPolicy::new("transits", RangeToken::LastMonth)
            .with_max_take(50_000)
            .with_week_column()
    }
}

fn push_contains(predicates: &mut Vec<Predicate>, field: Field, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        predicates.push(Predicate::contains(field, value));
    }
}

/// Predicates over the transit view.
///
/// Plaza: `peajeNombre` (exact) wins over `nombrePeaje` (contains), which
/// wins over `peaje` (contains); a bare plaza id is translated to its name.
pub fn transit_predicates(
    filters: &FilterSpecification,
    plaza_id: Option<i64>,
) -> Result<Vec<Predicate>> {
    let mut predicates = Vec::new();

    if let Some(exact) = filters.plaza_exact.as_deref() {
        predicates.push(Predicate::equals_text(Field::PlazaName, exact.trim()));
    } else if let Some(name) = filters.plaza_name.as_deref().or(filters.plaza.as_deref()) {
        push_contains(&mut predicates, Field::PlazaName, Some(name));
    } else if let Some(id) = plaza_id {
        predicates.push(Predicate::equals_text(Field::PlazaName, plaza_name_for(id)?));
    }

    if let Some(cabin) = filters.cabin {
        predicates.push(Predicate::equals_int(Field::Cabin, cabin));
    }
    if let Some(shift) = filters.shift {
        predicates.push(Predicate::equals_int(Field::Shift, shift));
    }
    if let Some(week) = filters.week {
        predicates.push(Predicate::equals_int(Field::Week, i64::from(week)));
    }

    push_contains(&mut predicates, Field::ReceiptNumber, filters.receipt_number.as_deref());
    push_contains(&mut predicates, Field::PartNumber, filters.part_number.as_deref());
    push_contains(&mut predicates, Field::Cashier, filters.cashier.as_deref());
    push_contains(&mut predicates, Field::Plate, filters.plate.as_deref());
    push_contains(&mut predicates, Field::Category, filters.category.as_deref());
    push_contains(&mut predicates, Field::Type1, filters.type1.as_deref());
    push_contains(&mut predicates, Field::Type2, filters.type2.as_deref());

    Ok(predicates)
}

fn hour_counts(buckets: &[Bucket<i64>]) -> Vec<HourCount> {
    aggregation::hourly_series(buckets)
        .into_iter()
        .map(|slot| HourCount {
            hour: slot.label,
            count: aggregation::count_of(slot.value),
        })
        .collect()
}

/// Fold `(hour) -> count` and `(date, hour) -> count` rows
pub fn fold_transits(hourly: &[GroupedRow], by_day: &[GroupedRow]) -> TransitSummary {
    let hourly_buckets: Vec<Bucket<i64>> = hourly
        .iter()
        .filter_map(|row| Some(Bucket::new(row.key(0).as_int()?, row.measure(0))))
        .collect();
    let hourly = hour_counts(&hourly_buckets);
    let total_transits = hourly.iter().map(|slot| slot.count).sum();

    let mut days: BTreeMap<NaiveDate, Vec<Bucket<i64>>> = BTreeMap::new();
    for row in by_day {
        let (Some(date), Some(hour)) = (row.key(0).as_date(), row.key(1).as_int()) else {
            continue;
        };
        days.entry(date)
            .or_default()
            .push(Bucket::new(hour, row.measure(0)));
    }

    let daily_hourly = days
        .into_iter()
        .map(|(date, buckets)| DailyHours {
            date: calendar::format_iso_date(date),
            hours: hour_counts(&buckets),
        })
        .collect();

    TransitSummary {
        total_transits,
        hourly,
        daily_hourly,
    }
}

#[async_trait]
impl ReportDomain for TransitReport {
    type Record = TransitRecord;
    type Summary = TransitSummary;

    fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    fn rows(&self) -> Arc<dyn RowSource<TransitRecord>> {
        Arc::clone(&self.source)
    }

    fn predicates(&self, spec: &NormalizedSpec) -> Result<Vec<Predicate>> {
        transit_predicates(&spec.filters, spec.plaza_id)
    }

    fn record_total(&self, record: &TransitRecord) -> Decimal {
        record.amount()
    }

    async fn summarize(&self, scope: &Scope, _spec: &NormalizedSpec) -> Result<TransitSummary> {
        let hourly_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Hour])
            .measures([Measure::Count]);
        let daily_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Date, GroupKey::Hour])
            .measures([Measure::Count]);

        let (hourly, by_day) = tokio::try_join!(
            self.source.fetch_grouped(&hourly_query),
            self.source.fetch_grouped(&daily_query),
        )?;

        Ok(fold_transits(&hourly, &by_day))
    }
}
