use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Range token outside the closed set (or a compare token on a report without comparison)
    #[error("Unknown range token: {0}")]
    UnknownRangeToken(String),

    /// Symbolic plaza name or id without a configured mapping
    #[error("Unmapped location: {0}")]
    UnmappedLocation(String),

    /// Explicit custom range wider than the report allows
    #[error("Custom range spans {days} days (maximum {max_days} days)")]
    RangeTooWide { days: i64, max_days: i64 },

    /// Other client input errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnknownRangeToken(_) => StatusCode::BAD_REQUEST,
            AppError::UnmappedLocation(_) => StatusCode::BAD_REQUEST,
            AppError::RangeTooWide { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn unknown_range(token: impl Into<String>) -> Self {
        AppError::UnknownRangeToken(token.into())
    }

    pub fn unmapped_location(name: impl Into<String>) -> Self {
        AppError::UnmappedLocation(name.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Client-input errors are surfaced verbatim and never retried
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
