//! REST record source.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{FetchError, RecordSource};
use crate::core::{Period, PurchaseRecord, SaleRecord};

/// Record source backed by a REST service.
///
/// Issues `GET {base_url}/purchases?month=M&year=Y` and
/// `GET {base_url}/sales?month=M&year=Y`, each answering a JSON array of
/// records. Timeouts surface as [`FetchError::Unavailable`].
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

/// Builder for [`HttpSource`].
///
/// ```
/// use dgii_formatos::source::HttpSourceBuilder;
/// use std::time::Duration;
///
/// let source = HttpSourceBuilder::new("https://erp.example.do/api/fiscal")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
pub struct HttpSourceBuilder {
    base_url: String,
    timeout: Duration,
    bearer_token: Option<String>,
}

impl HttpSourceBuilder {
    /// Create a builder for `base_url` with a 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            bearer_token: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn build(self) -> Result<HttpSource, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &self.bearer_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FetchError::Unavailable(format!("invalid bearer token: {e}")))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        Ok(HttpSource {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl HttpSource {
    /// Source with default settings for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        HttpSourceBuilder::new(base_url).build()
    }

    fn endpoint(&self, resource: &str, period: Period) -> String {
        format!(
            "{}/{resource}?month={}&year={}",
            self.base_url,
            period.month(),
            period.year()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(%url, "fetching records");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn purchases(&self, period: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        self.get_json(&self.endpoint("purchases", period)).await
    }

    async fn sales(&self, period: Period) -> Result<Vec<SaleRecord>, FetchError> {
        self.get_json(&self.endpoint("sales", period)).await
    }
}
