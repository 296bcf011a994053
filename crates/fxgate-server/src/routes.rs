use std::sync::Arc;

use axum::extract::{Extension, Form, Query, State};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fxgate_core::ConversionRequest;

use crate::auth::{CurrentUser, require_active_user};
use crate::dto::{
    AccountResponse, ConversionResponse, ConvertQuery, CredentialsForm, CurrencyListResponse,
    HealthResponse, TokenResponse,
};
use crate::error::ApiError;
use crate::incident::record_failures;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/currency/all", get(list_currencies))
        .route("/v1/convert", get(convert))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_active_user,
        ));

    let public = Router::new()
        .route("/gettoken", post(get_token))
        .route("/createaccount", post(create_account))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(api)
        .layer(middleware::from_fn_with_state(state.clone(), record_failures))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/gettoken",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token", body = TokenResponse),
        (status = 401, description = "Incorrect username or password", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn get_token(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.auth.login(&form.username, &form.password).await?;
    Ok(Json(TokenResponse::bearer(token)))
}

#[utoipa::path(
    post,
    path = "/createaccount",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account created or replaced", body = AccountResponse),
    ),
    tag = "auth"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .auth
        .create_account(&form.username, &form.password)
        .await?;
    Ok(Json(AccountResponse::from(record)))
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/currency/all",
    responses(
        (status = 200, description = "Supported currency codes", body = CurrencyListResponse),
        (status = 400, description = "Inactive user", body = crate::dto::ErrorResponse),
        (status = 401, description = "Could not validate credentials", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unhandled failure", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "currency"
)]
pub async fn list_currencies(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.exchange.list_currencies().await?;
    tracing::debug!(username = %user.username, count = currencies.len(), "Listed currencies");

    Ok(Json(CurrencyListResponse {
        currencies: currencies.into_iter().map(String::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/convert",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Converted amount keyed by target currency", body = ConversionResponse),
        (status = 400, description = "Malformed date or inactive user", body = crate::dto::ErrorResponse),
        (status = 401, description = "Could not validate credentials", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unhandled failure", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "currency"
)]
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut request =
        ConversionRequest::new(&query.base_currency, &query.target_currency, query.amount);
    if let Some(date) = query.date {
        request = request.on_date(date);
    }

    let conversion = state.exchange.convert(&request).await?;
    tracing::debug!(username = %user.username, target = %conversion.target, "Converted");

    Ok(Json(ConversionResponse::from(conversion)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}
