use std::str::FromStr;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Claims;

/// Lifetime of a token, in minutes, when the caller does not ask for one.
pub const DEFAULT_TTL_MINUTES: i64 = 15;

/// Issues and verifies HMAC-signed JWTs carrying a subject claim.
///
/// Tokens are self-contained: nothing is stored server-side and there is
/// no revocation or refresh. An expired token requires a fresh login.
#[derive(Clone)]
pub struct TokenIssuer {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from a shared secret and an algorithm name
    /// (`HS256`, `HS384` or `HS512`).
    pub fn new(secret: &str, algorithm: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::ConfigError("signing secret must not be empty".into()));
        }

        let algorithm = Algorithm::from_str(algorithm.trim()).map_err(|_| {
            AppError::ConfigError(format!("unknown signing algorithm '{algorithm}'"))
        })?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::ConfigError(format!(
                "signing algorithm {algorithm:?} needs a key pair; only HS256/HS384/HS512 are supported"
            )));
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign a token for `subject`, valid for `ttl` (15 minutes when `None`).
    pub fn issue(&self, subject: &str, ttl: Option<TimeDelta>) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = now
            .checked_add_signed(ttl.unwrap_or_else(|| TimeDelta::minutes(DEFAULT_TTL_MINUTES)))
            .ok_or_else(|| AppError::TokenError("token expiry overflows".into()))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        tracing::debug!(subject, exp = claims.exp, "Issuing access token");

        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| AppError::TokenError(e.to_string()))
    }

    /// Check signature, structure, and expiry; return the subject.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AppError::InvalidToken(e.to_string()))?;
        Ok(data.claims.sub)
    }
}
