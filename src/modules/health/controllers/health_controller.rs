use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::config::database::missing_views;
use crate::modules::report_views;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

/// Readiness response structure
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
    /// Report views the connected schema lacks
    pub missing_views: Vec<String>,
}

impl ReadinessResponse {
    fn new(database: bool, missing_views: Vec<String>) -> Self {
        Self {
            ready: database && missing_views.is_empty(),
            database,
            missing_views,
        }
    }
}

/// GET /health - Liveness check
/// Does not touch the reporting database
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - Readiness check
/// Checks that every report view exists in the reporting database
pub async fn readiness_check(pool: web::Data<MySqlPool>) -> impl Responder {
    let response = match missing_views(pool.get_ref(), &report_views()).await {
        Ok(missing) => {
            if !missing.is_empty() {
                tracing::warn!(views = ?missing, "Report views missing");
            }
            ReadinessResponse::new(true, missing.into_iter().map(str::to_string).collect())
        }
        Err(e) => {
            tracing::error!("Database readiness check failed: {}", e);
            ReadinessResponse::new(false, Vec::new())
        }
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
