/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Sentinel message for a zone with no stored readings. The polluted-time
/// endpoint maps this to 404.
pub const ERROR_RECORDS_NOT_EXIST: &str = "No records exist in database";

/// Error body returned to clients: `{status, message}`. Internal detail is
/// logged server-side and never serialized here.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("upstream air quality request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(e) => {
                error!("database failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            ApiError::Upstream(e) => {
                error!("upstream air quality failure: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream air quality request failed".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => {
                error!("internal failure: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
