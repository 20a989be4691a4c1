//! Mapping of failed submissions to HTTP responses.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use truthlens_core::{Failure, FailureKind, InputError};

/// JSON error body: `{ "error": kind, "message": .., "raw": .. }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// An input failure with a specific status.
    pub fn input(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: FailureKind::Input.as_str(),
                message: message.into(),
                raw: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Input => StatusCode::BAD_REQUEST,
        FailureKind::Remote | FailureKind::MalformedJson | FailureKind::TypeMismatch => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self {
            status: status_for(failure.kind),
            body: ErrorBody {
                error: failure.kind.as_str(),
                message: failure.message,
                raw: failure.raw_text,
            },
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Failure::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::input(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::input(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::input(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
