pub mod analytics;
pub mod billing;
pub mod collections;
pub mod health;
pub mod statistics;
pub mod tag_sales;
pub mod transits;

use actix_web::web;

/// Register every report route on the current scope
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    collections::controllers::configure_collection_routes(cfg);
    transits::controllers::configure_transit_routes(cfg);
    tag_sales::controllers::configure_tag_sales_routes(cfg);
    statistics::controllers::configure_statistics_routes(cfg);
    billing::controllers::configure_billing_routes(cfg);
}

/// Views the reports read from; readiness requires all of them
pub fn report_views() -> [&'static str; 5] {
    [
        collections::repositories::COLLECTIONS_VIEW.table,
        transits::repositories::TRANSITS_VIEW.table,
        tag_sales::repositories::TAG_SALES_VIEW.table,
        statistics::repositories::STATISTICS_VIEW.table,
        billing::repositories::BILLING_VIEW.table,
    ]
}
