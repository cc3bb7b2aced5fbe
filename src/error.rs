use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("GPX parse error: {0}")]
    Parse(String),

    #[error("Missing anchor: no {0} tag found in GPX text")]
    MissingAnchor(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_message) = match self {
            AppError::InvalidConfiguration(_) | AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Parse(ref e) => {
                tracing::info!("Rejected unparseable GPX: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            AppError::MissingAnchor(_) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::DirectionsApi(ref e) => {
                tracing::error!("Directions API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error".to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
