//! HTTP error mapping.
//!
//! Request-caused failures keep their message. Anything else becomes a 500
//! with a fixed message; the underlying error only goes to the log.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use notekeep_core::Error;

use crate::response::ErrorBody;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const UNAUTHORIZED: &str = "Unauthorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidTitle(msg)
            | Error::InvalidIdentifier(msg)
            | Error::InvalidPagination(msg)
            | Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                error!(error = %other, "Unhandled server error");
                ApiError::Internal(INTERNAL_SERVER_ERROR.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            message: self.message().to_string(),
        });
        (status, body).into_response()
    }
}

/// Attach an operation name and a client-facing 500 message to a store result.
pub trait OperationContext<T> {
    fn context(self, op: &'static str, message: &'static str) -> Result<T, ApiError>;
}

impl<T> OperationContext<T> for notekeep_core::Result<T> {
    fn context(self, op: &'static str, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|err| {
            if err.is_classified() {
                return ApiError::from(err);
            }
            error!(op, error = %err, "{}", message);
            ApiError::Internal(message.to_string())
        })
    }
}
