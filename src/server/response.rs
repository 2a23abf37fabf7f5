// src/server/response.rs
//! Error responses.
//!
//! Every failure leaves the server as `{ "error": message }`. Input
//! problems and missing sections carry their own message; anything else
//! is logged and replaced by a fixed per-operation message.

use crate::error::AppError;
use crate::types::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A failure ready to be sent to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Classifies a service error. `fallback` replaces the message of
    /// anything that is not the caller's fault.
    pub fn from_app(err: AppError, fallback: &'static str) -> Self {
        match err {
            AppError::ValidationError(e) => e.into(),
            AppError::SectionNotFound { message, .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
            },
            other => {
                log::error!("{}: {}", fallback, other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: fallback.to_string(),
                }
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Attaches the per-operation failure message to a service result.
pub trait OrRespond<T> {
    fn or_respond(self, fallback: &'static str) -> ApiResult<T>;
}

impl<T> OrRespond<T> for Result<T, AppError> {
    fn or_respond(self, fallback: &'static str) -> ApiResult<T> {
        self.map_err(|err| ApiError::from_app(err, fallback))
    }
}
