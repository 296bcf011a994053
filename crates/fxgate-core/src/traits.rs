use std::future::Future;

use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{CredentialRecord, CurrencyCode};

/// Persists and retrieves credential records, keyed by username.
///
/// `put` overwrites unconditionally: there is no "already exists" check.
pub trait CredentialStore: Send + Sync + Clone {
    fn get(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<CredentialRecord>, AppError>> + Send;

    fn put(
        &self,
        username: &str,
        record: CredentialRecord,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Foreign-exchange rate source. One outbound call per method, no retries.
pub trait RateProvider: Send + Sync + Clone {
    /// Every currency code the provider supports.
    fn list_currencies(&self) -> impl Future<Output = Result<Vec<CurrencyCode>, AppError>> + Send;

    /// Convert `amount` of `base` into `target` at the latest rate.
    fn convert_latest(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        amount: f64,
    ) -> impl Future<Output = Result<f64, AppError>> + Send;

    /// The `base` → `target` rate on a given day.
    fn historical_rate(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> impl Future<Output = Result<f64, AppError>> + Send;
}
