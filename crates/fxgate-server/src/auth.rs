use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use fxgate_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The account a protected request was authorized as.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

/// Extract the token from `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware that resolves the bearer token to an active account and
/// exposes it to handlers as [`CurrentUser`].
pub async fn require_active_user(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_string) else {
        return ApiError(AppError::InvalidToken("missing bearer token".to_string()))
            .into_response();
    };

    match state.auth.resolve_active(&token).await {
        Ok(record) => {
            request.extensions_mut().insert(CurrentUser {
                username: record.username,
            });
            next.run(request).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}
