use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{Conversion, CurrencyCode};
use crate::traits::RateProvider;

/// Quantity sent upstream for latest-rate conversions.
///
/// The latest-rate branch converts this fixed amount and ignores the
/// caller's `amount`; the historical branch scales by the caller's amount.
pub const REFERENCE_AMOUNT: f64 = 1000.0;

/// Parse an ISO calendar date (`yyyy-mm-dd`).
///
/// chrono accepts signs, padding spaces and short years under `%Y-%m-%d`, so
/// the parsed date must format back to exactly the input.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == raw)
        .ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// A conversion as requested by a caller, before validation.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: f64,
    pub date: Option<String>,
}

impl ConversionRequest {
    pub fn new(base: &str, target: &str, amount: f64) -> Self {
        Self {
            base: CurrencyCode::new(base),
            target: CurrencyCode::new(target),
            amount,
            date: None,
        }
    }

    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Currency listing and conversion on top of a [`RateProvider`].
#[derive(Clone)]
pub struct ExchangeService<P>
where
    P: RateProvider,
{
    provider: P,
}

impl<P> ExchangeService<P>
where
    P: RateProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, AppError> {
        let currencies = self.provider.list_currencies().await?;
        tracing::debug!(count = currencies.len(), "Fetched supported currencies");
        Ok(currencies)
    }

    /// Convert between two currencies, optionally at a historical date.
    ///
    /// A malformed date is rejected before any upstream call is made.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<Conversion, AppError> {
        let date = request.date.as_deref().map(parse_date).transpose()?;

        let amount = match date {
            None => {
                self.provider
                    .convert_latest(&request.base, &request.target, REFERENCE_AMOUNT)
                    .await?
            }
            Some(date) => {
                let rate = self
                    .provider
                    .historical_rate(date, &request.base, &request.target)
                    .await?;
                rate * request.amount
            }
        };

        tracing::debug!(
            base = %request.base,
            target = %request.target,
            date = ?date,
            amount,
            "Conversion complete"
        );

        Ok(Conversion {
            target: request.target.clone(),
            amount,
        })
    }
}
