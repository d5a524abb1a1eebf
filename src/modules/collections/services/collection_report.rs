use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{calendar, Result};
use crate::modules::analytics::models::location::{plaza_by_name, plaza_name_for};
use crate::modules::analytics::models::{
    DomainPolicy, Field, GroupKey, GroupedQuery, GroupedRow, Measure, NormalizedSpec, Predicate,
    RangeToken, Scope, PLAZAS,
};
use crate::modules::analytics::repositories::RowSource;
use crate::modules::analytics::services::{ReportDomain, ReportOrchestrator};
use crate::modules::collections::models::{CollectionRecord, CollectionSummary, DailyCollection};

/// Cash collection report
pub struct CollectionReport {
    policy: DomainPolicy,
    source: Arc<dyn RowSource<CollectionRecord>>,
}

pub type CollectionService = ReportOrchestrator<CollectionReport>;

impl CollectionReport {
    pub fn new(source: Arc<dyn RowSource<CollectionRecord>>) -> Self {
        Self {
            policy: Self::default_policy(),
            source,
        }
    }

    /// Last calendar month by default, pages up to 10 000 rows
    pub fn default_policy() -> DomainPolicy {
        DomainPolicy::new("collections", RangeToken::LastMonth).with_week_column()
    }
}

fn zeroed_plazas() -> BTreeMap<String, Decimal> {
    PLAZAS
        .iter()
        .map(|plaza| (plaza.name.to_string(), Decimal::ZERO))
        .collect()
}

/// Fold `(date, plaza name) -> deposited` rows. Days with only unknown
/// plazas still get an all-zero entry.
pub fn fold_collections(rows: &[GroupedRow]) -> CollectionSummary {
    let mut daily: BTreeMap<NaiveDate, BTreeMap<String, Decimal>> = BTreeMap::new();
    let mut plaza_totals = zeroed_plazas();

    for row in rows {
        let Some(date) = row.key(0).as_date() else {
            continue;
        };
        let day = daily.entry(date).or_insert_with(zeroed_plazas);

        let Some(plaza) = row.key(1).as_text().and_then(plaza_by_name) else {
            continue;
        };
        let amount = row.measure(0);
        *day.entry(plaza.name.to_string()).or_default() += amount;
        *plaza_totals.entry(plaza.name.to_string()).or_default() += amount;
    }

    let grand_total = plaza_totals.values().copied().sum();
    let daily_totals = daily
        .into_iter()
        .map(|(date, plazas)| DailyCollection {
            date: calendar::format_iso_date(date),
            plazas,
        })
        .collect();

    CollectionSummary {
        daily_totals,
        plaza_totals,
        grand_total,
    }
}

#[async_trait]
impl ReportDomain for CollectionReport {
    type Record = CollectionRecord;
    type Summary = CollectionSummary;

    fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    fn rows(&self) -> Arc<dyn RowSource<CollectionRecord>> {
        Arc::clone(&self.source)
    }

    fn predicates(&self, spec: &NormalizedSpec) -> Result<Vec<Predicate>> {
        let filters = &spec.filters;
        let mut predicates = Vec::new();

        // The view is keyed by plaza name; an id is translated back
        match (filters.plaza_name.as_deref(), spec.plaza_id) {
            (Some(name), _) => predicates.push(Predicate::contains(Field::PlazaName, name.trim())),
            (None, Some(id)) => {
                predicates.push(Predicate::equals_text(Field::PlazaName, plaza_name_for(id)?))
            }
            (None, None) => {}
        }
        if let Some(shift) = filters.shift {
            predicates.push(Predicate::equals_int(Field::Shift, shift));
        }
        if let Some(week) = filters.week {
            predicates.push(Predicate::equals_int(Field::Week, i64::from(week)));
        }

        Ok(predicates)
    }

    fn record_total(&self, record: &CollectionRecord) -> Decimal {
        record.amount()
    }

    async fn summarize(&self, scope: &Scope, _spec: &NormalizedSpec) -> Result<CollectionSummary> {
        let query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Date, GroupKey::PlazaName])
            .measures([Measure::Amount]);
        let rows = self.source.fetch_grouped(&query).await?;
        Ok(fold_collections(&rows))
    }
}
