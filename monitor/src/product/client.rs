use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, instrument};

use crate::config::RunConfig;
use crate::product::ProductSource;
use crate::product::errors::FetchError;
use crate::product::types::{ProductEnvelope, ProductQuery, ProductSnapshot};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Longest slice of an error body kept in a `FetchError::Status`.
const MAX_ERROR_BODY: usize = 256;

#[derive(Clone)]
pub struct ProductClient {
    http: Client,
    url: String,
    fallback_name: String,
    timeout: Duration,
}

impl ProductClient {
    pub fn new(url: String, fallback_name: String) -> Result<Self, FetchError> {
        Self::with_timeout(url, fallback_name, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        url: String,
        fallback_name: String,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            url,
            fallback_name,
            timeout,
        })
    }

    pub fn from_config(cfg: &RunConfig) -> Result<Self, FetchError> {
        Self::new(cfg.api_endpoint.clone(), cfg.product_name.clone())
    }

    fn timeout_aware(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Http(err)
        }
    }
}

#[async_trait]
impl ProductSource for ProductClient {
    #[instrument(
        skip(self),
        fields(product_id = %product_id, url = %self.url),
        level = "debug"
    )]
    async fn fetch_snapshot(&self, product_id: &str) -> Result<ProductSnapshot, FetchError> {
        let resp = self
            .http
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .json(&ProductQuery {
                content_id: product_id,
            })
            .send()
            .await
            .map_err(|e| self.timeout_aware(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.timeout_aware(e))?;

        if status != StatusCode::OK {
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(FetchError::Status { status, body });
        }

        let envelope: ProductEnvelope = serde_json::from_str(&body)?;
        let snapshot = ProductSnapshot::from_envelope(envelope, &self.fallback_name)?;

        debug!(
            discount = snapshot.discount_percentage,
            current_price = snapshot.current_price,
            original_price = snapshot.original_price,
            "product pricing fetched"
        );

        Ok(snapshot)
    }
}
