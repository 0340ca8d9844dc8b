//! Catalog payload parsing

use regex::Regex;
use serde_json::Value;
use unifier_core::json::{first_price, first_string};
use unifier_core::{ProductRecord, Site, UnifierError};

const NAME_KEYS: &[&str] = &["title", "question", "name"];
const PRICE_KEYS: &[&str] = &["yesPrice", "bestBid", "price"];
const ID_KEYS: &[&str] = &["id", "slug", "market_id"];

/// Build records from a JSON catalog array.
///
/// Missing names become empty strings (the match engine treats those as
/// unmatchable singletons); a missing id falls back to the name, and a
/// missing per-item url falls back to the page url.
pub fn records_from_items(items: &[Value], page_url: &str) -> Vec<ProductRecord> {
    items
        .iter()
        .map(|item| {
            let name = first_string(item, NAME_KEYS).unwrap_or_default();
            let product_id = first_string(item, ID_KEYS).unwrap_or_else(|| name.clone());
            ProductRecord {
                site: Site::Polymarket,
                product_id,
                name,
                price: first_price(item, PRICE_KEYS),
                url: Some(first_string(item, &["url"]).unwrap_or_else(|| page_url.to_string())),
            }
        })
        .collect()
}

/// Fallback for payloads that are not a JSON array: harvest every
/// `"title": "..."` literal into a name-only record.
pub fn records_from_text(body: &str, page_url: &str) -> Result<Vec<ProductRecord>, UnifierError> {
    let title = Regex::new(r#""title":\s*"(.*?)""#)
        .map_err(|e| UnifierError::internal(format!("title pattern failed to compile: {}", e)))?;

    Ok(title
        .captures_iter(body)
        .map(|caps| {
            let name = caps[1].to_string();
            ProductRecord {
                site: Site::Polymarket,
                product_id: name.clone(),
                name,
                price: None,
                url: Some(page_url.to_string()),
            }
        })
        .collect())
}
