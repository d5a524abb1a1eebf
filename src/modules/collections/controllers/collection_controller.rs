use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::core::error::AppError;
use crate::modules::analytics::models::FilterSpecification;
use crate::modules::collections::services::CollectionService;

/// Cash collection report
/// GET /collections
pub async fn get_collections(
    service: web::Data<Arc<CollectionService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let report = service.run(query.into_inner(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure_collection_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/collections", web::get().to(get_collections));
}
