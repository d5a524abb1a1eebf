use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{calendar, Result};
use crate::modules::analytics::models::location::plaza_name_for;
use crate::modules::analytics::models::{
    DomainPolicy, Field, GroupKey, GroupedQuery, GroupedRow, Measure, NormalizedSpec, Predicate,
    RangeToken, Scope,
};
use crate::modules::analytics::repositories::RowSource;
use crate::modules::analytics::services::aggregation::{self, Bucket};
use crate::modules::analytics::services::{PreparedReport, ReportDomain, ReportOrchestrator};
use crate::modules::statistics::models::{
    payment_classes, CabinAnalysis, CabinCount, CabinPayment, CabinShare, CabinShift,
    CategoryRevenue, CategorySplit, DailyCabin, DayCount, ExemptType, HeatCell, MonthlyRevenue,
    PaymentClass, PeakHour, StatisticsRecord, StatisticsSummary, TagTypeTotal, TemporalAnalysis,
    WeekdayAverage, TAG_TYPES,
};
use crate::modules::transits::models::TransitRecord;

const CATEGORIES: u8 = 6;
const FULL_DISCOUNT: &str = "RFID 100 %";

/// Statistical report; overview over the category/value view, temporal and
/// cabin analyses over both that view and the transit view
pub struct StatisticsReport {
    policy: DomainPolicy,
    source: Arc<dyn RowSource<StatisticsRecord>>,
    transits: Arc<dyn RowSource<TransitRecord>>,
}

pub type StatisticsService = ReportOrchestrator<StatisticsReport>;

impl StatisticsReport {
    pub fn new(
        source: Arc<dyn RowSource<StatisticsRecord>>,
        transits: Arc<dyn RowSource<TransitRecord>>,
    ) -> Result<Self> {
        Ok(Self {
            policy: Self::default_policy()?,
            source,
            transits,
        })
    }

    /// Last 7 days by default, custom ranges up to 90 days, nothing before
    /// January 2025, no comparison
    pub fn default_policy() -> Result<DomainPolicy> {
        Ok(DomainPolicy::new("statistics", RangeToken::Last7d)
            .with_max_take(30_000)
            .with_max_span_days(90)
            .with_floor(calendar::start_of_month(2025, 1)?)
            .without_comparison()
            .with_rows_and_aggregates()
            .resolving_plaza_ids())
    }

    /// Same window as the statistics scope; the transit view is keyed by
    /// plaza name
    fn transit_scope(&self, prepared: &PreparedReport) -> Result<Scope> {
        let mut predicates = Vec::new();
        if let Some(id) = prepared.spec.plaza_id {
            predicates.push(Predicate::equals_text(Field::PlazaName, plaza_name_for(id)?));
        }
        if let Some(cabin) = prepared.spec.filters.cabin {
            predicates.push(Predicate::equals_int(Field::Cabin, cabin));
        }
        Ok(Scope::new(prepared.scope.bounds, predicates))
    }

    /// Daily, hourly and weekday × hour transit counts
    pub async fn temporal_analysis(&self, prepared: &PreparedReport) -> Result<TemporalAnalysis> {
        let scope = self.transit_scope(prepared)?;
        let count_by = |keys: &[GroupKey]| {
            GroupedQuery::new(scope.clone())
                .group_by(keys.iter().copied())
                .measures([Measure::Count])
        };
        let daily_query = count_by(&[GroupKey::Date]);
        let hourly_query = count_by(&[GroupKey::Hour]);
        let heat_query = count_by(&[GroupKey::Weekday, GroupKey::Hour]);

        let (daily, hourly, heat) = tokio::try_join!(
            self.transits.fetch_grouped(&daily_query),
            self.transits.fetch_grouped(&hourly_query),
            self.transits.fetch_grouped(&heat_query),
        )?;

        debug!(days = daily.len(), "Folding temporal analysis");
        Ok(fold_temporal(
            &TemporalRows {
                daily,
                hourly,
                heat,
            },
            self.policy.ranking_size,
        ))
    }

    /// Per-lane vehicles, revenue, payment classes and shifts
    pub async fn cabin_analysis(&self, prepared: &PreparedReport) -> Result<CabinAnalysis> {
        let scope = &prepared.scope;
        let transit_scope = self.transit_scope(prepared)?;

        let daily_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Date])
            .measures([Measure::Vehicles]);
        let cabin_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Cabin])
            .measures([Measure::Vehicles, Measure::Revenue]);
        let daily_cabin_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Date, GroupKey::Cabin])
            .measures([Measure::Vehicles]);
        let payment_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Cabin, GroupKey::PaymentMethod])
            .measures([Measure::Vehicles]);
        let hourly_query = GroupedQuery::new(transit_scope.clone())
            .group_by([GroupKey::Hour])
            .measures([Measure::Count]);
        let shift_query = GroupedQuery::new(transit_scope)
            .group_by([GroupKey::Cabin, GroupKey::Shift])
            .measures([Measure::Count]);

        let (daily, per_cabin, daily_cabin, payments, hourly, shifts) = tokio::try_join!(
            self.source.fetch_grouped(&daily_query),
            self.source.fetch_grouped(&cabin_query),
            self.source.fetch_grouped(&daily_cabin_query),
            self.source.fetch_grouped(&payment_query),
            self.transits.fetch_grouped(&hourly_query),
            self.transits.fetch_grouped(&shift_query),
        )?;

        debug!(cabins = per_cabin.len(), "Folding cabin analysis");
        Ok(fold_cabins(
            &CabinRows {
                daily,
                per_cabin,
                daily_cabin,
                payments,
                hourly,
                shifts,
            },
            self.policy.ranking_size,
        ))
    }
}

fn overview_measures() -> Vec<Measure> {
    let mut measures = vec![Measure::Vehicles, Measure::Revenue];
    measures.extend((1..=CATEGORIES).map(Measure::CategoryVehicles));
    measures.extend((1..=CATEGORIES).map(Measure::CategoryRevenue));
    measures
}

fn category_label(category: usize) -> String {
    format!("CAT {}", category)
}

fn tag_rank(kind: &str) -> usize {
    TAG_TYPES
        .iter()
        .position(|tag| *tag == kind)
        .unwrap_or(TAG_TYPES.len())
}

/// Fold `(payment form) -> [vehicles, revenue, vehicles per category, revenue
/// per category]` rows and `(year, month, payment form) -> revenue` rows
pub fn fold_overview(by_payment: &[GroupedRow], monthly: &[GroupedRow]) -> StatisticsSummary {
    let table = payment_classes();
    let categories = usize::from(CATEGORIES);
    // measures: vehicles, revenue, vehicles per category, revenue per category
    let vehicles_at =
        |row: &GroupedRow, category: usize| aggregation::count_of(row.measure(2 + category));
    let revenue_at =
        |row: &GroupedRow, category: usize| row.measure(2 + categories + category);

    let mut revenue_total = Decimal::ZERO;
    let mut all_vehicles = 0;
    let mut cash_vehicles = 0;
    let mut exempt_vehicles = 0;
    let mut full_discount_vehicles = 0;
    let mut cash_by_category = vec![Decimal::ZERO; categories];
    let mut split = vec![(0i64, 0i64); categories];
    let mut tags: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
    let mut exempt: BTreeMap<String, i64> = BTreeMap::new();

    for row in by_payment {
        let method = row.key(0).as_text().unwrap_or_default().trim();
        let vehicles = aggregation::count_of(row.measure(0));
        let revenue = row.measure(1);
        all_vehicles += vehicles;

        let class = table.classify(method);
        for (category, (cash, other)) in split.iter_mut().enumerate() {
            if class == PaymentClass::Cash {
                *cash += vehicles_at(row, category);
            } else {
                *other += vehicles_at(row, category);
            }
        }

        match class {
            PaymentClass::Cash => {
                cash_vehicles += vehicles;
                revenue_total += revenue;
                for (category, value) in cash_by_category.iter_mut().enumerate() {
                    *value += revenue_at(row, category);
                }
            }
            PaymentClass::ElectronicToll => {
                if method == FULL_DISCOUNT {
                    full_discount_vehicles += vehicles;
                } else {
                    revenue_total += revenue;
                }
                let entry = tags.entry(method.to_string()).or_default();
                entry.0 += vehicles;
                entry.1 += revenue;
            }
            PaymentClass::Exempt => {
                exempt_vehicles += vehicles;
                *exempt.entry(method.to_string()).or_default() += vehicles;
            }
        }
    }

    let cash_revenue_by_category = cash_by_category
        .into_iter()
        .enumerate()
        .filter(|(_, value)| !value.is_zero())
        .map(|(category, value)| CategoryRevenue {
            category: category_label(category + 1),
            value,
        })
        .collect();

    let cash_vs_other_by_category = split
        .into_iter()
        .enumerate()
        .map(|(category, (cash, other))| CategorySplit {
            category: category_label(category + 1),
            cash,
            other,
        })
        .collect();

    let mut tag_types: Vec<TagTypeTotal> = tags
        .into_iter()
        .filter(|(_, (vehicles, _))| *vehicles != 0)
        .map(|(kind, (vehicles, value))| TagTypeTotal {
            kind,
            vehicles,
            value,
        })
        .collect();
    tag_types.sort_by_key(|tag| tag_rank(&tag.kind));

    let mut exempt_types: Vec<ExemptType> = exempt
        .into_iter()
        .map(|(kind, vehicles)| ExemptType { kind, vehicles })
        .collect();
    exempt_types.sort_by(|a, b| b.vehicles.cmp(&a.vehicles));

    let monthly_cash_revenue = aggregation::merge_by_key(monthly.iter().filter_map(|row| {
        let method = row.key(2).as_text()?;
        if table.classify(method) != PaymentClass::Cash {
            return None;
        }
        Some(((row.key(0).as_int()?, row.key(1).as_int()?), row.measure(0)))
    }))
    .into_iter()
    .filter_map(|bucket| {
        let (year, month) = bucket.key;
        let (year, month) = (i32::try_from(year).ok()?, u32::try_from(month).ok()?);
        Some(MonthlyRevenue {
            month: calendar::format_month_label(year, month),
            value: bucket.value,
        })
    })
    .collect();

    StatisticsSummary {
        revenue_total,
        cash_vehicles,
        exempt_vehicles,
        full_discount_vehicles,
        exempt_percentage: aggregation::share(
            Decimal::from(exempt_vehicles + full_discount_vehicles),
            Decimal::from(all_vehicles),
        )
        .round_dp(2),
        cash_revenue_by_category,
        cash_vs_other_by_category,
        tag_types,
        exempt_types,
        monthly_cash_revenue,
    }
}

/// Grouped rows behind a temporal analysis
#[derive(Debug, Clone, Default)]
pub struct TemporalRows {
    /// `(date) -> count`
    pub daily: Vec<GroupedRow>,
    /// `(hour) -> count`
    pub hourly: Vec<GroupedRow>,
    /// `(weekday, hour) -> count`
    pub heat: Vec<GroupedRow>,
}

fn date_buckets(rows: &[GroupedRow]) -> Vec<Bucket<NaiveDate>> {
    aggregation::merge_by_key(
        rows.iter()
            .filter_map(|row| Some((row.key(0).as_date()?, row.measure(0)))),
    )
}

fn int_buckets(rows: &[GroupedRow]) -> Vec<Bucket<i64>> {
    aggregation::merge_by_key(
        rows.iter()
            .filter_map(|row| Some((row.key(0).as_int()?, row.measure(0)))),
    )
}

fn day_count(bucket: &Bucket<NaiveDate>) -> DayCount {
    DayCount {
        date: calendar::format_iso_date(bucket.key),
        count: aggregation::count_of(bucket.value),
    }
}

fn peak_hour(rows: &[GroupedRow]) -> Option<PeakHour> {
    let hours: Vec<Bucket<i64>> = int_buckets(rows)
        .into_iter()
        .filter(|bucket| (0..24).contains(&bucket.key))
        .collect();
    aggregation::peak(&hours).map(|bucket| PeakHour {
        hour: calendar::format_hour_label(bucket.key),
        count: aggregation::count_of(bucket.value),
    })
}

pub fn fold_temporal(rows: &TemporalRows, ranking_size: usize) -> TemporalAnalysis {
    let days = date_buckets(&rows.daily);
    let total = aggregation::total(&days);

    let mut weekdays = [(Decimal::ZERO, 0usize); 7];
    for bucket in &days {
        let slot = &mut weekdays[bucket.key.weekday().num_days_from_sunday() as usize];
        slot.0 += bucket.value;
        slot.1 += 1;
    }
    let weekday_averages = weekdays
        .iter()
        .enumerate()
        .filter_map(|(index, (total, count))| {
            Some(WeekdayAverage {
                day: aggregation::weekday_label(index as i64 + 1)?.to_string(),
                average: aggregation::average(*total, *count).round_dp(2),
                total: aggregation::count_of(*total),
            })
        })
        .collect();

    let heatmap = aggregation::merge_by_key(rows.heat.iter().filter_map(|row| {
        Some(((row.key(0).as_int()?, row.key(1).as_int()?), row.measure(0)))
    }))
    .into_iter()
    .filter_map(|bucket| {
        let (weekday, hour) = bucket.key;
        if !(0..24).contains(&hour) {
            return None;
        }
        Some(HeatCell {
            day: aggregation::weekday_label(weekday)?.to_string(),
            hour: calendar::format_hour_label(hour),
            count: aggregation::count_of(bucket.value),
        })
    })
    .collect();

    TemporalAnalysis {
        total_transits: aggregation::count_of(total),
        daily_average: aggregation::average(total, days.len()).round_dp(2),
        peak_day: aggregation::peak(&days).map(day_count),
        peak_hour: peak_hour(&rows.hourly),
        daily_trend: days.iter().map(day_count).collect(),
        weekday_averages,
        heatmap,
        top_days: aggregation::top_n(&days, ranking_size).iter().map(day_count).collect(),
        bottom_days: aggregation::bottom_n(&days, ranking_size)
            .iter()
            .map(day_count)
            .collect(),
    }
}

/// Grouped rows behind a cabin analysis
#[derive(Debug, Clone, Default)]
pub struct CabinRows {
    /// `(date) -> vehicles`
    pub daily: Vec<GroupedRow>,
    /// `(cabin) -> [vehicles, revenue]`
    pub per_cabin: Vec<GroupedRow>,
    /// `(date, cabin) -> vehicles`
    pub daily_cabin: Vec<GroupedRow>,
    /// `(cabin, payment form) -> vehicles`
    pub payments: Vec<GroupedRow>,
    /// `(hour) -> count`, transit view
    pub hourly: Vec<GroupedRow>,
    /// `(cabin, shift) -> count`, transit view
    pub shifts: Vec<GroupedRow>,
}

fn cabin_count(bucket: &Bucket<i64>) -> CabinCount {
    CabinCount {
        cabin: bucket.key,
        vehicles: aggregation::count_of(bucket.value),
    }
}

pub fn fold_cabins(rows: &CabinRows, ranking_size: usize) -> CabinAnalysis {
    let days = date_buckets(&rows.daily);
    let cabins = int_buckets(&rows.per_cabin);
    let revenue: BTreeMap<i64, Decimal> = rows
        .per_cabin
        .iter()
        .filter_map(|row| Some((row.key(0).as_int()?, row.measure(1))))
        .collect();

    let total = aggregation::total(&cabins);
    let mut shares: Vec<CabinShare> = aggregation::with_shares(&cabins)
        .into_iter()
        .map(|bucket| CabinShare {
            cabin: bucket.key,
            vehicles: aggregation::count_of(bucket.value),
            share: bucket.share.round_dp(2),
            revenue: revenue.get(&bucket.key).copied().unwrap_or_default(),
        })
        .collect();
    shares.sort_by(|a, b| b.vehicles.cmp(&a.vehicles));

    let daily_trend = aggregation::merge_by_key(rows.daily_cabin.iter().filter_map(|row| {
        Some(((row.key(0).as_date()?, row.key(1).as_int()?), row.measure(0)))
    }))
    .into_iter()
    .map(|bucket| DailyCabin {
        date: calendar::format_iso_date(bucket.key.0),
        cabin: bucket.key.1,
        vehicles: aggregation::count_of(bucket.value),
    })
    .collect();

    let table = payment_classes();
    let payment_by_cabin = aggregation::fold_classified(
        rows.payments.iter().filter_map(|row| {
            Some((
                row.key(0).as_int()?,
                row.key(1).as_text().unwrap_or_default(),
                row.measure(0),
            ))
        }),
        &table,
    )
    .into_iter()
    .map(|bucket| CabinPayment {
        cabin: bucket.key.0,
        class: bucket.key.1,
        vehicles: aggregation::count_of(bucket.value),
    })
    .collect();

    let shifts = aggregation::merge_by_key(rows.shifts.iter().filter_map(|row| {
        Some(((row.key(0).as_int()?, row.key(1).as_int()?), row.measure(0)))
    }))
    .into_iter()
    .map(|bucket| CabinShift {
        cabin: bucket.key.0,
        shift: bucket.key.1,
        transits: aggregation::count_of(bucket.value),
    })
    .collect();

    CabinAnalysis {
        total_vehicles: aggregation::count_of(total),
        daily_average: aggregation::average(aggregation::total(&days), days.len()).round_dp(2),
        top_cabin: aggregation::peak(&cabins).map(cabin_count),
        bottom_cabin: aggregation::trough(&cabins).map(cabin_count),
        peak_hour: peak_hour(&rows.hourly),
        cabins: shares,
        daily_trend,
        payment_by_cabin,
        shifts,
        top_cabins: aggregation::top_n(&cabins, ranking_size)
            .iter()
            .map(cabin_count)
            .collect(),
        bottom_cabins: aggregation::bottom_n(&cabins, ranking_size)
            .iter()
            .map(cabin_count)
            .collect(),
    }
}

#[async_trait]
impl ReportDomain for StatisticsReport {
    type Record = StatisticsRecord;
    type Summary = StatisticsSummary;

    fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    fn rows(&self) -> Arc<dyn RowSource<StatisticsRecord>> {
        Arc::clone(&self.source)
    }

    fn predicates(&self, spec: &NormalizedSpec) -> Result<Vec<Predicate>> {
        let filters = &spec.filters;
        let mut predicates = Vec::new();

        if let Some(concession) = filters.concession_id {
            predicates.push(Predicate::equals_int(Field::ConcessionId, concession));
        }
        if let Some(plaza_id) = spec.plaza_id {
            predicates.push(Predicate::equals_int(Field::PlazaId, plaza_id));
        }
        if let Some(cabin) = filters.cabin {
            predicates.push(Predicate::equals_int(Field::Cabin, cabin));
        }
        if let Some(method) = filters
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|method| !method.is_empty())
        {
            predicates.push(Predicate::equals_text(Field::PaymentMethod, method));
        }

        Ok(predicates)
    }

    fn trend_measure(&self) -> Measure {
        Measure::Revenue
    }

    fn record_total(&self, record: &StatisticsRecord) -> Decimal {
        record.revenue()
    }

    async fn summarize(&self, scope: &Scope, _spec: &NormalizedSpec) -> Result<StatisticsSummary> {
        let payment_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::PaymentMethod])
            .measures(overview_measures());
        let monthly_query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Year, GroupKey::Month, GroupKey::PaymentMethod])
            .measures([Measure::Revenue]);

        let (by_payment, monthly) = tokio::try_join!(
            self.source.fetch_grouped(&payment_query),
            self.source.fetch_grouped(&monthly_query),
        )?;

        Ok(fold_overview(&by_payment, &monthly))
    }
}
