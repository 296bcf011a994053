use chrono::TimeDelta;

use crate::error::AppError;
use crate::models::CredentialRecord;
use crate::password::PasswordHasher;
use crate::token::TokenIssuer;
use crate::traits::CredentialStore;

/// Account creation, password login, and bearer-token resolution.
///
/// Generic over the credential store so durable storage can replace the
/// in-memory map without touching any of the logic here.
#[derive(Clone)]
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: S,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
    token_ttl: TimeDelta,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    pub fn new(store: S, hasher: PasswordHasher, tokens: TokenIssuer, token_ttl: TimeDelta) -> Self {
        Self {
            store,
            hasher,
            tokens,
            token_ttl,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn token_ttl(&self) -> TimeDelta {
        self.token_ttl
    }

    /// Hash the password and store a fresh, enabled record.
    ///
    /// An existing record with the same username is overwritten.
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialRecord, AppError> {
        let hasher = self.hasher;
        let plaintext = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::Generic(format!("hashing task failed: {e}")))??;

        let record = CredentialRecord::new(username, password_hash);
        self.store.put(username, record.clone()).await?;

        tracing::info!(username, "Account created");
        Ok(record)
    }

    /// Check a username/password pair against the store.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialRecord, AppError> {
        let Some(record) = self.store.get(username).await? else {
            tracing::warn!(username, "Login attempt for unknown user");
            return Err(AppError::InvalidCredentials);
        };

        let hasher = self.hasher;
        let plaintext = password.to_string();
        let digest = record.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest))
            .await
            .map_err(|e| AppError::Generic(format!("verification task failed: {e}")))?;

        if !valid {
            tracing::warn!(username, "Failed login attempt");
            return Err(AppError::InvalidCredentials);
        }
        Ok(record)
    }

    /// Authenticate and mint an access token with the configured lifetime.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let record = self.authenticate(username, password).await?;
        let token = self.tokens.issue(&record.username, Some(self.token_ttl))?;
        tracing::info!(username = %record.username, "Login successful");
        Ok(token)
    }

    /// Resolve a bearer token to an active account.
    ///
    /// Unauthenticated → Identified (token verifies) → Active (record exists
    /// and is not disabled). An unknown subject is reported as an invalid
    /// token; a disabled account is reported separately.
    pub async fn resolve_active(&self, token: &str) -> Result<CredentialRecord, AppError> {
        let subject = self.tokens.verify(token)?;

        let record = self
            .store
            .get(&subject)
            .await?
            .ok_or_else(|| AppError::InvalidToken(format!("no account for subject '{subject}'")))?;

        if record.disabled {
            return Err(AppError::AccountDisabled(record.username));
        }
        Ok(record)
    }
}
