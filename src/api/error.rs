//! Mapping from domain failures to HTTP responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Store failures on read endpoints are server errors
    pub fn read(err: DomainError, message: &str) -> Self {
        Self::from_domain(err, StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Store failures on mutating endpoints are reported as bad requests
    pub fn write(err: DomainError, message: &str) -> Self {
        Self::from_domain(err, StatusCode::BAD_REQUEST, message)
    }

    fn from_domain(err: DomainError, fallback: StatusCode, message: &str) -> Self {
        match err {
            DomainError::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                message: "Book not found".to_string(),
            },
            DomainError::Validation(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg,
            },
            DomainError::Database(msg) => {
                tracing::error!("{}: {}", message, msg);
                Self {
                    status: fallback,
                    message: message.to_string(),
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
