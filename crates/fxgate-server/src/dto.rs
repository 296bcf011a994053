use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fxgate_core::{Conversion, CredentialRecord};

// ---------------------------------------------------------------------------
// Accounts & tokens
// ---------------------------------------------------------------------------

/// Form-encoded `username` / `password` pair.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AccountResponse {
    pub username: String,
    pub disabled: bool,
}

impl From<CredentialRecord> for AccountResponse {
    fn from(record: CredentialRecord) -> Self {
        Self {
            username: record.username,
            disabled: record.disabled,
        }
    }
}

// ---------------------------------------------------------------------------
// Currencies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CurrencyListResponse {
    pub currencies: Vec<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ConvertQuery {
    pub base_currency: String,
    pub target_currency: String,
    pub amount: f64,
    /// Historical date, `yyyy-mm-dd`. Latest rates when omitted.
    pub date: Option<String>,
}

/// `{<TARGET_CODE>: <converted amount>}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ConversionResponse(pub BTreeMap<String, f64>);

impl From<Conversion> for ConversionResponse {
    fn from(conversion: Conversion) -> Self {
        Self(BTreeMap::from([(
            String::from(conversion.target),
            conversion.amount,
        )]))
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
