use std::error::Error as _;
use std::fmt::Write as _;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use fxgate_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Attached to a 500 response so the incident middleware can record what
/// went wrong without leaking it to the caller.
#[derive(Clone, Debug)]
pub struct FailureReport(pub String);

/// Render an error and its `source()` chain, one cause per line.
pub fn describe(err: &AppError) -> String {
    let mut out = format!("{err:?}: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n caused by: {cause}");
        source = cause.source();
    }
    out
}

fn error_body(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        message: message.into(),
    };
    (status, axum::Json(body)).into_response()
}

fn unauthorized(message: &str) -> Response {
    let mut response = error_body(StatusCode::UNAUTHORIZED, "unauthorized", message);
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Upstream 4xx/5xx statuses are relayed as-is; anything else becomes 502.
fn relay_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::InvalidCredentials => unauthorized("Incorrect username or password"),
            AppError::InvalidToken(reason) => {
                tracing::warn!(%reason, "Rejected bearer token");
                unauthorized("Could not validate credentials")
            }
            AppError::AccountDisabled(_) => {
                error_body(StatusCode::BAD_REQUEST, "inactive_user", "Inactive user")
            }
            err @ AppError::InvalidDate(_) => {
                error_body(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
            }
            AppError::Upstream { status, body } => {
                (relay_status(status), axum::Json(body)).into_response()
            }
            err => {
                tracing::error!(error = %err, "Unhandled request failure");
                let mut response = error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An error occurred",
                );
                response
                    .extensions_mut()
                    .insert(FailureReport(describe(&err)));
                response
            }
        }
    }
}
