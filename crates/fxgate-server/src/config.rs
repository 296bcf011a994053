use std::path::PathBuf;

use chrono::TimeDelta;
use clap::Parser;
use fxgate_core::AppError;

/// Server configuration, read from flags or the environment (`.env` honored).
#[derive(Clone, Parser)]
#[command(name = "fxgate", version, about = "Authenticated currency-rate gateway")]
pub struct ServerConfig {
    /// Shared secret used to sign access tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Token signing algorithm (HS256, HS384 or HS512)
    #[arg(long, env = "ALGORITHM")]
    pub algorithm: String,

    /// Access token lifetime in minutes
    #[arg(long = "token-ttl-minutes", env = "ACCESS_TOKEN_EXPIRE_MINUTES")]
    pub access_token_expire_minutes: i64,

    /// FastForex API key
    #[arg(long, env = "FAST_FOREX_API_KEY", hide_env_values = true)]
    pub fast_forex_api_key: String,

    /// FastForex API base URL
    #[arg(
        long,
        env = "FAST_FOREX_BASE_URL",
        default_value = "https://api.fastforex.io"
    )]
    pub fast_forex_base_url: String,

    /// Interface to bind
    #[arg(long, env = "FXGATE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "FXGATE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// File that receives one block per unhandled request failure
    #[arg(long, env = "FXGATE_ERROR_LOG", default_value = "log.txt")]
    pub error_log: PathBuf,

    /// bcrypt work factor for stored passwords
    #[arg(long, env = "FXGATE_BCRYPT_COST", default_value_t = 12)]
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Token lifetime as a duration; must be positive.
    pub fn token_ttl(&self) -> Result<TimeDelta, AppError> {
        let minutes = self.access_token_expire_minutes;
        if minutes <= 0 {
            return Err(AppError::ConfigError(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be at least 1, got {minutes}"
            )));
        }
        TimeDelta::try_minutes(minutes).ok_or_else(|| {
            AppError::ConfigError(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES '{minutes}' is out of range"
            ))
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
