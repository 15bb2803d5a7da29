//! Mapping of crate errors onto HTTP responses.
//!
//! Client mistakes keep their message. Storage and framework failures are logged and
//! answered with a generic 500 so internals never reach the browser.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Route an unauthenticated caller should use.
pub const LOGIN_ROUTE: &str = "/api/auth/login";

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::LogNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::EnvVar(_)
            | Self::FrameworkError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {self}");
            json!({ "error": "Internal server error" })
        } else if status == StatusCode::UNAUTHORIZED {
            json!({ "error": self.to_string(), "login": LOGIN_ROUTE })
        } else {
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}
