use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    // Surface the underlying error message in logs, not in the response
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, Json(err)).into_response(),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                let body = Json(ValidationError {
                    message: "internal server error".to_string(),
                    field: None,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
