use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "fxgate API",
        version = "0.1.0",
        description = "Password login, bearer tokens, and currency rates from FastForex."
    ),
    paths(
        crate::routes::get_token,
        crate::routes::create_account,
        crate::routes::list_currencies,
        crate::routes::convert,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::CredentialsForm,
        crate::dto::TokenResponse,
        crate::dto::AccountResponse,
        crate::dto::CurrencyListResponse,
        crate::dto::ConversionResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Accounts and access tokens"),
        (name = "currency", description = "Currency listing and conversion"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from POST /gettoken."))
                        .build(),
                ),
            );
        }
    }
}
