use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flightcart_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    InvalidBody(String),
    NotFoundError(String),
    UpstreamError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid search parameters", Some(msg))
            }
            AppError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, "Invalid cart item", Some(msg)),
            AppError::NotFoundError(id) => {
                tracing::info!("Cart item not found: {}", id);
                (StatusCode::NOT_FOUND, "Item not found", None)
            }
            AppError::UpstreamError(msg) => {
                tracing::error!("Error fetching flights: {}", msg);
                (StatusCode::BAD_GATEWAY, "Failed to fetch flights", Some(msg))
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        };

        let body = match details {
            Some(details) => json!({ "success": false, "error": error_message, "details": details }),
            None => json!({ "success": false, "error": error_message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSearchParameters(msg) => AppError::ValidationError(msg),
            CoreError::CartItemNotFound(id) => AppError::NotFoundError(id),
            CoreError::UpstreamUnavailable(msg) => AppError::UpstreamError(msg),
            other @ CoreError::MalformedOffer(_) => AppError::Anyhow(other.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
