//! Arbitrary-page text harvester

use crate::extract;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, instrument};
use unifier_core::{ProductRecord, Site, UnifierError};
use unifier_match::normalize;

/// Default extraction selector
const PAGE_TEXT_SELECTOR: &str = "a, article, div";
/// At most this many texts are considered per page
const MAX_CANDIDATES: usize = 200;
/// De-duplication key: leading characters of the normalized text
const DEDUP_KEY_LEN: usize = 80;
const NAME_LEN: usize = 140;
const ID_LEN: usize = 40;

/// Harvests market-like text from any web page
#[derive(Clone)]
pub struct PageTextClient {
    client: Client,
    selector: String,
}

impl PageTextClient {
    /// Create a harvester with the default selector
    pub fn new() -> Self {
        Self::with_selector(PAGE_TEXT_SELECTOR)
    }

    /// Create a harvester with a custom CSS selector
    pub fn with_selector(selector: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            selector: selector.into(),
        }
    }

    /// Get the extraction selector
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Fetch `url` and turn its visible text into name-only records.
    #[instrument(skip(self))]
    pub async fn harvest_page(&self, url: &str) -> Result<Vec<ProductRecord>, UnifierError> {
        info!("Harvesting page text from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UnifierError::network(format!("Failed to fetch page: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UnifierError::api(format!(
                "Page request failed with {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UnifierError::network(format!("Failed to read page body: {}", e)))?;

        let records = records_from_page(&body, &self.selector, url)?;
        info!("Page texts harvested: {}", records.len());
        Ok(records)
    }
}

impl Default for PageTextClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Distill page text into records: texts longer than 10 characters, capped
/// at 200 candidates, de-duplicated by the leading 80 characters of the
/// normalized text. Names are truncated to 140 characters and ids to 40.
pub fn records_from_page(
    body: &str,
    selector: &str,
    page_url: &str,
) -> Result<Vec<ProductRecord>, UnifierError> {
    let texts = extract::element_texts(body, selector)?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for text in texts
        .into_iter()
        .filter(|text| text.chars().count() > extract::MIN_TEXT_LEN)
        .take(MAX_CANDIDATES)
    {
        let key = extract::truncate_chars(&normalize(&text), DEDUP_KEY_LEN);
        if !seen.insert(key.clone()) {
            continue;
        }
        records.push(ProductRecord {
            site: Site::Browser,
            product_id: extract::truncate_chars(&key, ID_LEN),
            name: extract::truncate_chars(&text, NAME_LEN),
            price: None,
            url: Some(page_url.to_string()),
        });
    }
    Ok(records)
}
