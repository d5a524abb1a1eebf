use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::core::error::AppError;
use crate::modules::analytics::models::FilterSpecification;
use crate::modules::billing::services::BillingService;

/// Billing document listing
/// GET /billing
pub async fn get_billing(
    service: web::Data<Arc<BillingService>>,
    query: web::Query<FilterSpecification>,
) -> Result<HttpResponse, AppError> {
    let report = service.run(query.into_inner(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure_billing_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/billing", web::get().to(get_billing));
}
