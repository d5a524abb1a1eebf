use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::core::error::AppError;
use crate::modules::analytics::models::FilterSpecification;
use crate::modules::statistics::models::Analysis;
use crate::modules::statistics::services::StatisticsService;

/// Statistical report over the category/value view
/// GET /statistics
pub async fn get_statistics(
    service: web::Data<Arc<StatisticsService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let report = service.run(query.into_inner(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Transit volume by day, hour and weekday
/// GET /statistics/temporal
pub async fn get_temporal_analysis(
    service: web::Data<Arc<StatisticsService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let prepared = service.prepare(query.into_inner(), Utc::now())?;
    let aggregates = service.domain().temporal_analysis(&prepared).await?;
    Ok(HttpResponse::Ok().json(Analysis { aggregates }))
}

/// Lane breakdown of vehicles, revenue and payment classes
/// GET /statistics/cabins
pub async fn get_cabin_analysis(
    service: web::Data<Arc<StatisticsService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let prepared = service.prepare(query.into_inner(), Utc::now())?;
    let aggregates = service.domain().cabin_analysis(&prepared).await?;
    Ok(HttpResponse::Ok().json(Analysis { aggregates }))
}

pub fn configure_statistics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/statistics")
            .route("", web::get().to(get_statistics))
            .route("/temporal", web::get().to(get_temporal_analysis))
            .route("/cabins", web::get().to(get_cabin_analysis)),
    );
}
