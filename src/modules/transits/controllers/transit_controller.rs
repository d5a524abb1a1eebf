use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::core::error::AppError;
use crate::modules::analytics::models::FilterSpecification;
use crate::modules::transits::services::TransitService;

/// Lane transit report
/// GET /transits
pub async fn get_transits(
    service: web::Data<Arc<TransitService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let report = service.run(query.into_inner(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure_transit_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/transits", web::get().to(get_transits));
}
