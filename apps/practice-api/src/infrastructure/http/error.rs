//! HTTP error mapping.
//!
//! Every handler failure becomes an [`ApiError`], which renders as
//! `{"error": ...}` with an optional `details` list. Internal causes are
//! logged and never sent to the caller.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::response::{ErrorBody, FieldIssue};

/// Error category, mapped to an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed or invalid input.
    InvalidRequest,
    /// Referenced record does not exist.
    NotFound,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Vec<FieldIssue>,
}

impl ApiError {
    /// A 400 without field detail.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// A 400 with field detail.
    pub fn validation(message: impl Into<String>, details: Vec<FieldIssue>) -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            message: message.into(),
            details,
        }
    }

    /// A 404.
    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "Record not found");
        Self {
            code: ErrorCode::NotFound,
            message,
            details: Vec::new(),
        }
    }

    /// A 500 with a generic `message`; `cause` is logged only.
    pub fn internal(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        let message = message.into();
        tracing::error!(error = %cause, "{message}");
        Self {
            code: ErrorCode::InternalError,
            message,
            details: Vec::new(),
        }
    }

    /// Error category.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Caller-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
impl ApiError {
    pub(crate) fn into_parts(self) -> (u16, ErrorBody) {
        (
            self.code.status().as_u16(),
            ErrorBody {
                error: self.message,
                details: self.details,
            },
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.status(), self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.code.status(), Json(body)).into_response()
    }
}
