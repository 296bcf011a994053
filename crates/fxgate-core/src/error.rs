use thiserror::Error;

/// Application-wide error types for fxgate.
#[derive(Error, Debug)]
pub enum AppError {
    /// Login attempted with an unknown username or a wrong password.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired, badly signed, or naming an unknown subject.
    #[error("Could not validate credentials: {0}")]
    InvalidToken(String),

    /// Token resolved to an account that has been disabled.
    #[error("Inactive user: {0}")]
    AccountDisabled(String),

    /// A `date` parameter that is not an ISO calendar date.
    #[error("The date {0} should be formatted as yyyy-mm-dd")]
    InvalidDate(String),

    /// Upstream provider answered with a non-200 status.
    #[error("Upstream error (HTTP {status}): {body}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// HTTP request to the upstream provider failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Upstream returned 200 but the payload lacked the expected fields.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Token encoding failed.
    #[error("Token error: {0}")]
    TokenError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the caller is at fault and the failure should not be
    /// recorded as an incident.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials
                | AppError::InvalidToken(_)
                | AppError::AccountDisabled(_)
                | AppError::InvalidDate(_)
        )
    }

    /// Returns true for failures that originate at the upstream provider and
    /// are passed through to the caller verbatim.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Upstream { .. })
    }

    /// Everything else: surfaced as a generic 500 and written to the incident log.
    pub fn is_unhandled(&self) -> bool {
        !self.is_client_error() && !self.is_upstream()
    }
}
