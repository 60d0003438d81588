use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hexhop_shortener::ShortenError;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

pub enum AppError {
    /// The code has no mapping. A domain-level negative result, not a
    /// transport failure.
    NotFound,
    Shorten(ShortenError),
}

impl From<ShortenError> for AppError {
    fn from(value: ShortenError) -> Self {
        Self::Shorten(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "invalid code".to_string()),
            AppError::Shorten(e @ ShortenError::Exhausted) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Shorten(e @ ShortenError::Conflict(_)) => {
                (StatusCode::CONFLICT, e.to_string())
            }
            AppError::Shorten(ShortenError::Storage(_)) => {
                (StatusCode::BAD_GATEWAY, "storage error".to_string())
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
