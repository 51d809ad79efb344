use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON (de)serialization error on persisted data.
    #[error("Serialization error: {0}")]
    Serialization(#[from] sonic_rs::Error),

    /// An authentication error.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// An operation that needs a loaded session ran without one.
    #[error("No user session")]
    NoSession,

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large")]
    PayloadTooLarge,
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<garde::Report> for AppError {
    fn from(report: garde::Report) -> Self {
        AppError::Validation(report.to_string().trim().to_string())
    }
}

impl AppError {
    /// The message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Redis(_) | AppError::Io(_) | AppError::Serialization(_) => {
                "Storage error".to_string()
            }
            AppError::Authentication(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::NoSession => "No user session".to_string(),
            AppError::NotFound => "Resource not found".to_string(),
            AppError::PayloadTooLarge => "Payload too large".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Redis(ref e) => {
                tracing::error!("Redis error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }

            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }

            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }

            AppError::Authentication(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                StatusCode::UNAUTHORIZED
            }

            AppError::NoSession => {
                tracing::warn!("No user session");
                StatusCode::UNAUTHORIZED
            }

            AppError::NotFound => {
                tracing::debug!("Resource not found");
                StatusCode::NOT_FOUND
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                StatusCode::BAD_REQUEST
            }

            AppError::PayloadTooLarge => {
                tracing::debug!("Payload too large");
                StatusCode::PAYLOAD_TOO_LARGE
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "success": false,
            "error": self.user_message()
        }))
        .unwrap_or_else(|_| r#"{"success":false,"error":"Internal server error"}"#.to_string());

        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}
