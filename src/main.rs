use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use toll_analytics::billing::repositories::{BillingSource, BILLING_VIEW};
use toll_analytics::billing::{BillingReport, BillingService};
use toll_analytics::collections::repositories::{CollectionSource, COLLECTIONS_VIEW};
use toll_analytics::collections::{CollectionReport, CollectionService};
use toll_analytics::config::{AppConfig, Config, HttpConfig};
use toll_analytics::middleware::{query_error_handler, RequestId};
use toll_analytics::modules::{configure_report_routes, health::configure_health_routes};
use toll_analytics::statistics::repositories::{StatisticsSource, STATISTICS_VIEW};
use toll_analytics::statistics::{StatisticsReport, StatisticsService};
use toll_analytics::tag_sales::repositories::{TagSaleSource, TAG_SALES_VIEW};
use toll_analytics::tag_sales::{TagSalesReport, TagSalesService};
use toll_analytics::transits::repositories::{TransitSource, TRANSITS_VIEW};
use toll_analytics::transits::{TransitReport, TransitService};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(app.default_log_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    if app.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(http: &HttpConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600);

    if http.cors_allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    http.cors_allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    init_tracing(&config.app);
    config.validate()?;

    tracing::info!("Starting toll analytics service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let db_pool = config.database.create_pool().await?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let transit_rows = Arc::new(TransitSource::new(db_pool.clone(), &TRANSITS_VIEW));
    let collections = Arc::new(CollectionService::new(CollectionReport::new(Arc::new(
        CollectionSource::new(db_pool.clone(), &COLLECTIONS_VIEW),
    ))));
    let transits = Arc::new(TransitService::new(TransitReport::new(transit_rows.clone())));
    let tag_sales = Arc::new(TagSalesService::new(TagSalesReport::new(Arc::new(
        TagSaleSource::new(db_pool.clone(), &TAG_SALES_VIEW),
    ))));
    let statistics = Arc::new(StatisticsService::new(StatisticsReport::new(
        Arc::new(StatisticsSource::new(db_pool.clone(), &STATISTICS_VIEW)),
        transit_rows,
    )?));
    let billing = Arc::new(BillingService::new(BillingReport::new(Arc::new(
        BillingSource::new(db_pool.clone(), &BILLING_VIEW),
    ))));

    let bind_address = config.server.bind_address();
    let http = config.http.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&http))
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(collections.clone()))
            .app_data(web::Data::new(transits.clone()))
            .app_data(web::Data::new(tag_sales.clone()))
            .app_data(web::Data::new(statistics.clone()))
            .app_data(web::Data::new(billing.clone()))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .configure(configure_health_routes)
            .service(web::scope(&http.api_prefix).configure(configure_report_routes))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
