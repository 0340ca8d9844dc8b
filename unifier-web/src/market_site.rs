//! Generic market-site catalog client

use crate::extract;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument};
use unifier_core::json::{first_price, first_string};
use unifier_core::{ProductRecord, Site, UnifierError};

/// Default catalog endpoint for the generic market site
const MARKET_SITE_CATALOG_URL: &str = "https://prediction-market.com/markets";
/// Elements that typically carry a market name on catalog pages
const MARKET_CARD_SELECTOR: &str = "[data-market], article, a";

const NAME_KEYS: &[&str] = &["title", "name"];
const PRICE_KEYS: &[&str] = &["price", "last"];
const ID_KEYS: &[&str] = &["id", "slug"];

/// Catalog client for prediction-market-style sites
#[derive(Clone)]
pub struct MarketSiteClient {
    client: Client,
    catalog_url: String,
}

impl MarketSiteClient {
    /// Create a client against the default catalog endpoint
    pub fn new() -> Self {
        Self::with_catalog_url(MARKET_SITE_CATALOG_URL)
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
    /// JSON bodies may be a bare array or wrap their items in
    /// `markets`/`data`; HTML bodies are mined for market cards.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, UnifierError> {
        info!("Scraping market site from {}", self.catalog_url);

        let response = self.client.get(&self.catalog_url).send().await.map_err(|e| {
            UnifierError::network(format!("Failed to fetch market-site catalog: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UnifierError::api(format!(
                "Market-site catalog request failed with {}: {}",
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
            UnifierError::network(format!("Failed to read market-site response: {}", e))
        })?;

        let records = if is_json {
            let data: Value = serde_json::from_str(&body)
                .map_err(|e| UnifierError::parse(format!("Invalid market-site JSON: {}", e)))?;
            records_from_json(&data, &self.catalog_url)
        } else {
            records_from_html(&body, &self.catalog_url)?
        };

        info!("Market-site products scraped: {}", records.len());
        Ok(records)
    }
}

impl Default for MarketSiteClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build records from a JSON catalog: a bare array, or an object with the
/// items under `markets`/`data`.
pub fn records_from_json(data: &Value, page_url: &str) -> Vec<ProductRecord> {
    let items = match data.as_array() {
        Some(items) => items,
        None => match data
            .get("markets")
            .or_else(|| data.get("data"))
            .and_then(Value::as_array)
        {
            Some(items) => items,
            None => return Vec::new(),
        },
    };

    items
        .iter()
        .map(|item| {
            let name = first_string(item, NAME_KEYS).unwrap_or_default();
            let product_id = first_string(item, ID_KEYS).unwrap_or_else(|| name.clone());
            ProductRecord {
                site: Site::PredictionMarket,
                product_id,
                name,
                price: first_price(item, PRICE_KEYS),
                url: Some(first_string(item, &["url"]).unwrap_or_else(|| page_url.to_string())),
            }
        })
        .collect()
}

/// Fallback for HTML payloads: the text of every market card long enough
/// to be a market name becomes a name-only record, with the leading 40
/// characters as its id.
pub fn records_from_html(body: &str, page_url: &str) -> Result<Vec<ProductRecord>, UnifierError> {
    let texts = extract::element_texts(body, MARKET_CARD_SELECTOR)?;

    Ok(texts
        .into_iter()
        .filter(|text| text.chars().count() > extract::MIN_TEXT_LEN)
        .map(|text| ProductRecord {
            site: Site::PredictionMarket,
            product_id: extract::truncate_chars(&text, 40),
            name: text,
            price: None,
            url: Some(page_url.to_string()),
        })
        .collect())
}
