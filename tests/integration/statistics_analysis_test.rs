//! Integration tests for the statistical report: policy enforcement,
//! rows alongside aggregates, and the temporal and cabin analyses.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use helpers::{june_15_noon, utc, FakeRowSource};
use rust_decimal_macros::dec;
use toll_analytics::analytics::models::{
    Field, FilterSpecification, GroupKey, GroupedQuery, GroupedRow, KeyValue, Measure, Predicate,
    ReportOutcome,
};
use toll_analytics::core::AppError;
use toll_analytics::statistics::models::PaymentClass;
use toll_analytics::statistics::{StatisticsRecord, StatisticsReport, StatisticsService};
use toll_analytics::transits::TransitRecord;

struct Fixture {
    stats: Arc<FakeRowSource<StatisticsRecord>>,
    transits: Arc<FakeRowSource<TransitRecord>>,
    service: StatisticsService,
}

fn fixture(
    stats: FakeRowSource<StatisticsRecord>,
    transits: FakeRowSource<TransitRecord>,
) -> Fixture {
    let stats = Arc::new(stats);
    let transits = Arc::new(transits);
    let service =
        StatisticsService::new(StatisticsReport::new(stats.clone(), transits.clone()).unwrap());
    Fixture {
        stats,
        transits,
        service,
    }
}

fn record(cabin: i32, method: &str) -> StatisticsRecord {
    StatisticsRecord {
        date: NaiveDate::from_ymd_opt(2025, 6, 10),
        concession_id: Some(1),
        plaza_id: Some(1),
        cabin: Some(cabin),
        payment_method: Some(method.to_string()),
        month: Some(6),
        year: Some(2025),
        cat1: Some(3),
        cat2: Some(1),
        cat3: None,
        cat4: None,
        cat5: None,
        cat6: None,
        value1: Some(dec!(1.50)),
        value2: Some(dec!(2.00)),
        value3: None,
        value4: None,
        value5: None,
        value6: None,
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// Answers the transit view by grouping shape
fn transit_grouped(query: &GroupedQuery) -> Vec<GroupedRow> {
    match query.group_by.as_slice() {
        [GroupKey::Date] => vec![
            GroupedRow::new(vec![KeyValue::Date(date(8))], vec![dec!(120)]),
            GroupedRow::new(vec![KeyValue::Date(date(9))], vec![dec!(80)]),
        ],
        [GroupKey::Hour] => vec![
            GroupedRow::new(vec![KeyValue::Int(7)], vec![dec!(60)]),
            GroupedRow::new(vec![KeyValue::Int(18)], vec![dec!(140)]),
        ],
        [GroupKey::Weekday, GroupKey::Hour] => vec![GroupedRow::new(
            vec![KeyValue::Int(1), KeyValue::Int(18)],
            vec![dec!(90)],
        )],
        [GroupKey::Cabin, GroupKey::Shift] => vec![
            GroupedRow::new(vec![KeyValue::Int(1), KeyValue::Int(1)], vec![dec!(40)]),
            GroupedRow::new(vec![KeyValue::Int(1), KeyValue::Int(2)], vec![dec!(30)]),
        ],
        _ => Vec::new(),
    }
}

fn stats_grouped(query: &GroupedQuery) -> Vec<GroupedRow> {
    match query.group_by.as_slice() {
        [GroupKey::Cabin] => vec![
            GroupedRow::new(vec![KeyValue::Int(1)], vec![dec!(70), dec!(105.00)]),
            GroupedRow::new(vec![KeyValue::Int(2)], vec![dec!(30), dec!(30.00)]),
        ],
        [GroupKey::Date] => vec![
            GroupedRow::new(vec![KeyValue::Date(date(8))], vec![dec!(60)]),
            GroupedRow::new(vec![KeyValue::Date(date(9))], vec![dec!(40)]),
        ],
        [GroupKey::Cabin, GroupKey::PaymentMethod] => vec![
            GroupedRow::new(
                vec![KeyValue::Int(1), KeyValue::Text("EFEC.".to_string())],
                vec![dec!(50)],
            ),
            GroupedRow::new(
                vec![KeyValue::Int(1), KeyValue::Text("EXONERADO".to_string())],
                vec![dec!(20)],
            ),
            GroupedRow::new(
                vec![KeyValue::Int(2), KeyValue::Text("RFID 50 %".to_string())],
                vec![dec!(30)],
            ),
        ],
        _ => Vec::new(),
    }
}

#[tokio::test]
async fn test_defaults_to_last_seven_days() {
    let f = fixture(FakeRowSource::new(), FakeRowSource::new());

    let outcome = f
        .service
        .run(FilterSpecification::default(), june_15_noon())
        .await
        .unwrap();

    assert!(outcome.aggregates().is_some());
    let queries = f.stats.grouped_queries();
    assert_eq!(queries.len(), 2);
    assert!(queries.iter().all(|query| {
        query.scope.bounds.from == Some(june_15_noon() - Duration::days(7))
            && query.scope.bounds.until == Some(june_15_noon())
    }));
    assert!(queries
        .iter()
        .any(|query| query.measures.contains(&Measure::CategoryRevenue(6))));
}

#[tokio::test]
async fn test_comparison_is_not_offered() {
    let f = fixture(FakeRowSource::new(), FakeRowSource::new());

    let filters = FilterSpecification {
        range: Some("last7dPrevious".to_string()),
        ..Default::default()
    };
    let err = f.service.run(filters, june_15_noon()).await.unwrap_err();

    assert!(matches!(err, AppError::UnknownRangeToken(_)));
    assert_eq!(f.stats.fetch_count(), 0);
}

#[tokio::test]
async fn test_custom_range_is_capped_at_ninety_days() {
    let f = fixture(FakeRowSource::new(), FakeRowSource::new());

    let filters = FilterSpecification {
        start_date: Some("2025-02-01".to_string()),
        end_date: Some("2025-06-01".to_string()),
        ..Default::default()
    };
    let err = f.service.run(filters, june_15_noon()).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::RangeTooWide {
            days: 120,
            max_days: 90
        }
    ));
}

#[tokio::test]
async fn test_window_start_is_raised_to_the_floor() {
    let f = fixture(FakeRowSource::new(), FakeRowSource::new());

    let filters = FilterSpecification {
        start_date: Some("2024-12-01".to_string()),
        end_date: Some("2025-01-31".to_string()),
        ..Default::default()
    };
    f.service.run(filters, june_15_noon()).await.unwrap();

    let query = &f.stats.grouped_queries()[0];
    assert_eq!(query.scope.bounds.from, Some(utc(2025, 1, 1)));
    assert_eq!(query.scope.bounds.until, Some(utc(2025, 1, 31)));
}

#[tokio::test]
async fn test_include_data_returns_rows_with_aggregates() {
    let stats = FakeRowSource::new()
        .with_rows(|_| vec![record(1, "EFEC."), record(2, "RFID 0 %")])
        .with_grouped(|query| match query.group_by.as_slice() {
            [GroupKey::PaymentMethod] => {
                let mut measures = vec![dec!(4), dec!(3.50), dec!(3), dec!(1)];
                measures.extend([dec!(0); 4]);
                measures.extend([dec!(1.50), dec!(2.00)]);
                measures.extend([dec!(0); 4]);
                vec![GroupedRow::new(vec![KeyValue::Text("EFEC.".to_string())], measures)]
            }
            _ => Vec::new(),
        });
    let f = fixture(stats, FakeRowSource::new());

    let filters = FilterSpecification {
        include_data: Some(true),
        take: Some(50_000),
        ..Default::default()
    };
    let outcome = f.service.run(filters, june_15_noon()).await.unwrap();

    let ReportOutcome::Aggregated { data, aggregates } = outcome else {
        panic!("expected rows with aggregates");
    };
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].vehicles(), 4);
    assert_eq!(data[0].revenue(), dec!(3.50));
    assert_eq!(aggregates.summary.cash_vehicles, 4);
    assert_eq!(aggregates.summary.revenue_total, dec!(3.50));
    assert_eq!(aggregates.summary.cash_revenue_by_category.len(), 2);
    assert_eq!(f.stats.row_queries()[0].page.take, 30_000);
}

#[tokio::test]
async fn test_temporal_analysis_reads_the_transit_view() {
    let f = fixture(
        FakeRowSource::new(),
        FakeRowSource::new().with_grouped(transit_grouped),
    );

    let filters = FilterSpecification {
        plaza_id: Some(2),
        ..Default::default()
    };
    let prepared = f.service.prepare(filters, june_15_noon()).unwrap();
    let analysis = f.service.domain().temporal_analysis(&prepared).await.unwrap();

    assert_eq!(analysis.total_transits, 200);
    assert_eq!(analysis.daily_average, dec!(100));
    assert_eq!(analysis.peak_day.unwrap().date, "2025-06-08");
    assert_eq!(analysis.peak_hour.unwrap().hour, "18:00");
    assert_eq!(analysis.heatmap.len(), 1);
    assert_eq!(analysis.heatmap[0].day, "Sun");
    assert_eq!(analysis.top_days.len(), 2);

    assert_eq!(f.stats.fetch_count(), 0);
    let queries = f.transits.grouped_queries();
    assert_eq!(queries.len(), 3);
    assert!(queries.iter().all(|query| {
        query.scope.predicates == vec![Predicate::equals_text(Field::PlazaName, "LOS ANGELES")]
    }));
}

#[tokio::test]
async fn test_cabin_analysis_combines_both_views() {
    let f = fixture(
        FakeRowSource::new().with_grouped(stats_grouped),
        FakeRowSource::new().with_grouped(transit_grouped),
    );

    let filters = FilterSpecification {
        plaza_name: Some("CONGOMA".to_string()),
        ..Default::default()
    };
    let prepared = f.service.prepare(filters, june_15_noon()).unwrap();
    let analysis = f.service.domain().cabin_analysis(&prepared).await.unwrap();

    assert_eq!(analysis.total_vehicles, 100);
    assert_eq!(analysis.daily_average, dec!(50));
    assert_eq!(analysis.cabins[0].cabin, 1);
    assert_eq!(analysis.cabins[0].share, dec!(70));
    assert_eq!(analysis.cabins[0].revenue, dec!(105.00));
    assert_eq!(analysis.cabins[1].share, dec!(30));
    assert_eq!(analysis.top_cabin.as_ref().map(|cabin| cabin.cabin), Some(1));
    assert_eq!(analysis.bottom_cabin.as_ref().map(|cabin| cabin.cabin), Some(2));
    assert_eq!(analysis.peak_hour.as_ref().map(|hour| hour.count), Some(140));
    assert_eq!(analysis.shifts.len(), 2);

    let classes: Vec<(i64, PaymentClass, i64)> = analysis
        .payment_by_cabin
        .iter()
        .map(|payment| (payment.cabin, payment.class, payment.vehicles))
        .collect();
    assert_eq!(
        classes,
        vec![
            (1, PaymentClass::Cash, 50),
            (1, PaymentClass::Exempt, 20),
            (2, PaymentClass::ElectronicToll, 30),
        ]
    );

    // statistics view keyed by id, transit view by name
    assert!(f
        .stats
        .grouped_queries()
        .iter()
        .all(|query| query.scope.predicates == vec![Predicate::equals_int(Field::PlazaId, 1)]));
    assert!(f.transits.grouped_queries().iter().all(|query| {
        query.scope.predicates == vec![Predicate::equals_text(Field::PlazaName, "CONGOMA")]
    }));
}
