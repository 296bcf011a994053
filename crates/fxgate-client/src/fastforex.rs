use chrono::NaiveDate;
use fxgate_core::error::AppError;
use fxgate_core::models::CurrencyCode;
use fxgate_core::traits::RateProvider;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.fastforex.io";

/// Client for the FastForex rate API.
///
/// One outbound `POST` per operation. No retries and no timeout beyond the
/// transport default; any non-200 answer is surfaced as
/// [`AppError::Upstream`] carrying the provider's status and body.
#[derive(Clone)]
pub struct FastForexClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FastForexClient {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!("fxgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}/{path}", self.base_url))
            .map_err(|e| AppError::HttpError(format!("Invalid provider URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = self.endpoint(path, params)?;
        tracing::debug!(path, ?params, "Calling FastForex");

        let response = self.client.post(url).send().await.map_err(|e| {
            if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.map_err(|e| {
                tracing::warn!(path, error = %e, "Failed to read FastForex error body");
                e.without_url()
            });
            let body = error_body(text);
            tracing::warn!(path, status = status.as_u16(), "FastForex returned an error");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(format!("{path}: {}", e.without_url())))
    }
}

/// Body relayed for a non-200 answer: the provider's JSON if it sent JSON,
/// otherwise the text (or the read failure) wrapped as `{"error": ...}`.
fn error_body<E: std::fmt::Display>(text: Result<String, E>) -> serde_json::Value {
    match text {
        Ok(text) => serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::json!({ "error": text })),
        Err(e) => serde_json::json!({ "error": format!("unreadable response body: {e}") }),
    }
}

// ---- FastForex API types ----

#[derive(Deserialize)]
struct FetchAllResponse {
    results: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct ConvertResponse {
    result: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct HistoricalResponse {
    results: serde_json::Map<String, serde_json::Value>,
}

fn pick(
    values: &serde_json::Map<String, serde_json::Value>,
    target: &CurrencyCode,
    field: &str,
) -> Result<f64, AppError> {
    values
        .get(target.as_str())
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| {
            AppError::MalformedResponse(format!("no numeric '{target}' in `{field}`"))
        })
}

impl RateProvider for FastForexClient {
    async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, AppError> {
        let body: FetchAllResponse = self.call("fetch-all", &[]).await?;
        Ok(body.results.keys().map(|k| CurrencyCode::new(k)).collect())
    }

    async fn convert_latest(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        amount: f64,
    ) -> Result<f64, AppError> {
        let amount = amount.to_string();
        let body: ConvertResponse = self
            .call(
                "convert",
                &[
                    ("from", base.as_str()),
                    ("to", target.as_str()),
                    ("amount", amount.as_str()),
                ],
            )
            .await?;
        pick(&body.result, target, "result")
    }

    async fn historical_rate(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<f64, AppError> {
        let date = date.format("%Y-%m-%d").to_string();
        let body: HistoricalResponse = self
            .call(
                "historical",
                &[
                    ("date", date.as_str()),
                    ("from", base.as_str()),
                    ("to", target.as_str()),
                ],
            )
            .await?;
        pick(&body.results, target, "results")
    }
}
