use fxgate_client::FastForexClient;
use fxgate_core::{AppError, AuthService, ExchangeService, PasswordHasher, TokenIssuer};
use fxgate_store::MemoryCredentialStore;

use crate::config::ServerConfig;
use crate::incident::IncidentLog;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub auth: AuthService<MemoryCredentialStore>,
    pub exchange: ExchangeService<FastForexClient>,
    pub incidents: IncidentLog,
}

impl AppState {
    /// Wire the services from configuration. Fails on a bad algorithm,
    /// empty secret, out-of-range bcrypt cost, or non-positive token lifetime.
    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let hasher = PasswordHasher::with_cost(config.bcrypt_cost)?;
        let tokens = TokenIssuer::new(&config.secret_key, &config.algorithm)?;
        let provider =
            FastForexClient::with_base_url(&config.fast_forex_api_key, &config.fast_forex_base_url)?;

        Ok(Self {
            auth: AuthService::new(
                MemoryCredentialStore::new(),
                hasher,
                tokens,
                config.token_ttl()?,
            ),
            exchange: ExchangeService::new(provider),
            incidents: IncidentLog::new(config.error_log.clone()),
        })
    }
}
