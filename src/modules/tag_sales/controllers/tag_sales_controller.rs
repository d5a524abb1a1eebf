use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::core::error::AppError;
use crate::modules::analytics::models::FilterSpecification;
use crate::modules::tag_sales::services::TagSalesService;

/// Electronic tag sales report
/// GET /tag-sales
pub async fn get_tag_sales(
    service: web::Data<Arc<TagSalesService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let report = service.run(query.into_inner(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure_tag_sales_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tag-sales", web::get().to(get_tag_sales));
}
