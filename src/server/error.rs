// src/server/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::models::{ErrorBody, Language};

/// Request failures mapped to HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API key or malformed request")]
    Unauthorized,

    #[error("Invalid language. Must be one of: {}", Language::supported_list())]
    InvalidLanguage,

    #[error("Only MP3 format is supported")]
    UnsupportedFormat,

    #[error("Invalid base64 encoding")]
    InvalidBase64,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidLanguage | ApiError::UnsupportedFormat | ApiError::InvalidBase64 => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
