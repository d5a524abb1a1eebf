use actix_web::{error::QueryPayloadError, HttpRequest};

use crate::core::AppError;

/// Malformed filter query strings (`mes=abc`, `take=-x`) answer with the
/// same error body as every other client error
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected report query string");
    AppError::validation(format!("Invalid query string: {}", err)).into()
}
