//! Kalshi catalog client

use crate::parse;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};
use unifier_core::{ProductRecord, UnifierError};

/// Default Kalshi public catalog endpoint
const KALSHI_CATALOG_URL: &str = "https://api.elections.kalshi.com/trade-api/v2/markets";

/// Kalshi catalog client
#[derive(Clone)]
pub struct KalshiClient {
    client: Client,
    catalog_url: String,
}

impl KalshiClient {
    /// Create a client against the default catalog endpoint
    pub fn new() -> Self {
        Self::with_catalog_url(KALSHI_CATALOG_URL)
    }

    /// Create a client against a custom catalog URL
    pub fn with_catalog_url(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            catalog_url: url.into(),
        }
    }

    /// Get the catalog URL
    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    /// Fetch the catalog and parse it into product records.
    ///
    /// JSON bodies are read from the `markets`/`data` arrays; anything
    /// else is treated as HTML and mined for market links.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, UnifierError> {
        info!("Scraping Kalshi from {}", self.catalog_url);

        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| UnifierError::network(format!("Failed to fetch Kalshi catalog: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UnifierError::api(format!(
                "Kalshi catalog request failed with {}: {}",
                status, body
            )));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        let body = response
            .text()
            .await
            .map_err(|e| UnifierError::network(format!("Failed to read Kalshi response: {}", e)))?;

        let records = if is_json {
            let data: serde_json::Value = serde_json::from_str(&body)
                .map_err(|e| UnifierError::parse(format!("Invalid Kalshi JSON: {}", e)))?;
            parse::records_from_json(&data, &self.catalog_url)
        } else {
            parse::records_from_html(&body, &self.catalog_url)
        };

        info!("Kalshi products scraped: {}", records.len());
        Ok(records)
    }
}

impl Default for KalshiClient {
    fn default() -> Self {
        Self::new()
    }
}
