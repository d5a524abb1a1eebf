//! Contract tests for the report endpoints.
//!
//! Validates route wiring, response envelopes and the error body of every
//! report under `/api`, with in-memory row sources behind the services.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{test, web, App};
use helpers::FakeRowSource;
use rust_decimal_macros::dec;
use serde_json::Value;
use toll_analytics::analytics::models::{GroupKey, GroupedRow, KeyValue};
use toll_analytics::billing::{BillingRecord, BillingReport, BillingService};
use toll_analytics::collections::{CollectionRecord, CollectionReport, CollectionService};
use toll_analytics::middleware::{query_error_handler, RequestId, REQUEST_ID_HEADER};
use toll_analytics::modules::configure_report_routes;
use toll_analytics::statistics::{StatisticsRecord, StatisticsReport, StatisticsService};
use toll_analytics::tag_sales::{TagSaleRecord, TagSalesReport, TagSalesService};
use toll_analytics::transits::{TransitRecord, TransitReport, TransitService};

fn transit_rows() -> Arc<FakeRowSource<TransitRecord>> {
    Arc::new(FakeRowSource::new().with_grouped(|query| match query.group_by.as_slice() {
        [GroupKey::Hour] => vec![GroupedRow::new(vec![KeyValue::Int(9)], vec![dec!(12)])],
        _ => Vec::new(),
    }))
}

fn api(cfg: &mut web::ServiceConfig) {
    let collections = CollectionService::new(CollectionReport::new(Arc::new(
        FakeRowSource::<CollectionRecord>::new().with_grouped(|query| {
            if query.group_by.is_empty() {
                vec![GroupedRow::new(Vec::new(), vec![dec!(10)])]
            } else {
                Vec::new()
            }
        }),
    )));
    let transits = TransitService::new(TransitReport::new(transit_rows()));
    let tag_sales = TagSalesService::new(TagSalesReport::new(Arc::new(
        FakeRowSource::<TagSaleRecord>::new(),
    )));
    let statistics = StatisticsService::new(
        StatisticsReport::new(
            Arc::new(FakeRowSource::<StatisticsRecord>::new()),
            transit_rows(),
        )
        .unwrap(),
    );

    let billing = BillingService::new(BillingReport::new(Arc::new(
        FakeRowSource::<BillingRecord>::new().with_grouped(|query| match query.group_by.as_slice() {
            [GroupKey::Kind] => vec![GroupedRow::new(
                vec![KeyValue::Text("FACTURA".to_string())],
                vec![dec!(150.25), dec!(3)],
            )],
            _ => Vec::new(),
        }),
    )));

    cfg.app_data(web::Data::new(Arc::new(collections)))
        .app_data(web::Data::new(Arc::new(transits)))
        .app_data(web::Data::new(Arc::new(tag_sales)))
        .app_data(web::Data::new(Arc::new(statistics)))
        .app_data(web::Data::new(Arc::new(billing)))
        .service(web::scope("/api").configure(configure_report_routes));
}

async fn get(uri: &str) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .wrap(RequestId)
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .configure(api),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    let status = resp.status().as_u16();
    (status, test::read_body_json(resp).await)
}

fn assert_error(body: &Value, status: u16, prefix: &str) {
    assert_eq!(body["error"]["code"], status);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with(prefix), "unexpected message: {}", message);
}

#[actix_web::test]
async fn test_aggregate_envelope() {
    let (status, body) = get("/api/collections").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"], Value::Array(Vec::new()));
    assert!(body["aggregates"].get("dailyTotals").is_some());
    assert!(body["aggregates"].get("plazaTotals").is_some());
    assert!(body["aggregates"].get("grandTotal").is_some());
    assert!(body["aggregates"].get("comparison").is_none());
}

#[actix_web::test]
async fn test_aggregate_comparison_envelope() {
    let (status, body) = get("/api/collections?rango=last15dPrevious").await;

    assert_eq!(status, 200);
    let comparison = &body["aggregates"]["comparison"];
    assert!(comparison["changePercent"].is_number());
    assert_eq!(comparison["changePercent"].as_f64(), Some(0.0));
    assert_eq!(comparison["arrow"], "flat");
    assert_eq!(comparison["footer"], "↔ 0.0% same as the previous period");
}

#[actix_web::test]
async fn test_raw_comparison_envelope() {
    let (status, body) = get("/api/transits?rango=last7dPrevious&includeData=true").await;

    assert_eq!(status, 200);
    assert_eq!(body["actual"]["data"], Value::Array(Vec::new()));
    assert!(body["anterior"].get("total").is_some());
    assert_eq!(body["changePercent"], Value::Null);
    assert_eq!(body["footer"], "insufficient data to compare.");
}

#[actix_web::test]
async fn test_raw_rows_are_a_bare_array() {
    let (status, body) = get("/api/tag-sales?includeData=true&take=5").await;

    assert_eq!(status, 200);
    assert!(body.is_array());
}

#[actix_web::test]
async fn test_statistics_analyses() {
    let (status, body) = get("/api/statistics/temporal?idPeaje=1").await;
    assert_eq!(status, 200);
    assert_eq!(body["aggregates"]["peakHour"]["hour"], "09:00");
    assert_eq!(body["aggregates"]["weekdayAverages"].as_array().unwrap().len(), 7);

    let (status, body) = get("/api/statistics/cabins").await;
    assert_eq!(status, 200);
    assert_eq!(body["aggregates"]["totalVehicles"], 0);
    assert_eq!(body["aggregates"]["cabins"], Value::Array(Vec::new()));
}

#[actix_web::test]
async fn test_statistics_overview_keeps_rows_and_aggregates() {
    let (status, body) = get("/api/statistics?includeData=true").await;

    assert_eq!(status, 200);
    assert!(body["data"].is_array());
    assert!(body["aggregates"].get("exemptPercentage").is_some());
}

#[actix_web::test]
async fn test_billing_lists_rows_unless_totals_requested() {
    let (status, body) = get("/api/billing?numeroFactura=001-").await;
    assert_eq!(status, 200);
    assert!(body.is_array());

    let (status, body) = get("/api/billing?includeData=false").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], Value::Array(Vec::new()));
    assert_eq!(body["aggregates"]["documentCount"], 3);
    assert_eq!(body["aggregates"]["byKind"][0]["kind"], "FACTURA");

    let (status, body) = get("/api/billing?rango=lastMonthPrevious").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Unknown range token");
}

#[actix_web::test]
async fn test_client_errors() {
    let (status, body) = get("/api/transits?rango=ultimos30d").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Unknown range token: ultimos30d");

    let (status, body) = get("/api/statistics?fechaInicio=2025-01-01&fechaFin=2025-06-01").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Custom range spans 151 days (maximum 90 days)");

    let (status, body) = get("/api/statistics/cabins?rango=last7dPrevious").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Unknown range token");

    let (status, body) = get("/api/tag-sales?nombrePeaje=QUITO").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Unmapped location");

    let (status, body) = get("/api/collections?mes=abc").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Validation error: Invalid query string");

    let (status, body) = get("/api/collections?fechaInicio=2025-06-01&fechaFin=2025-05-01").await;
    assert_eq!(status, 400);
    assert_error(&body, 400, "Validation error");
}
