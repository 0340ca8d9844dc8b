//! Polymarket catalog client

use crate::parse;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};
use unifier_core::{ProductRecord, UnifierError};

/// Default Polymarket Gamma catalog endpoint
const POLYMARKET_CATALOG_URL: &str = "https://gamma-api.polymarket.com/markets";

/// Polymarket catalog client
#[derive(Clone)]
pub struct PolymarketClient {
    client: Client,
    catalog_url: String,
}

impl PolymarketClient {
    /// Create a client against the default catalog endpoint
    pub fn new() -> Self {
        Self::with_catalog_url(POLYMARKET_CATALOG_URL)
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
    /// JSON array bodies go through the structured parser; JSON bodies of
    /// any other shape and non-JSON bodies go through the title harvest.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, UnifierError> {
        info!("Scraping Polymarket from {}", self.catalog_url);

        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| {
                UnifierError::network(format!("Failed to fetch Polymarket catalog: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UnifierError::api(format!(
                "Polymarket catalog request failed with {}: {}",
                status, body
            )));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        let body = response.text().await.map_err(|e| {
            UnifierError::network(format!("Failed to read Polymarket response: {}", e))
        })?;

        let records = if is_json {
            let data: serde_json::Value = serde_json::from_str(&body)
                .map_err(|e| UnifierError::parse(format!("Invalid Polymarket JSON: {}", e)))?;
            match data.as_array() {
                Some(items) => parse::records_from_items(items, &self.catalog_url),
                None => parse::records_from_text(&body, &self.catalog_url)?,
            }
        } else {
            parse::records_from_text(&body, &self.catalog_url)?
        };

        info!("Polymarket products scraped: {}", records.len());
        Ok(records)
    }
}

impl Default for PolymarketClient {
    fn default() -> Self {
        Self::new()
    }
}
