//! Catalog payload parsing

use scraper::{Html, Selector};
use serde_json::Value;
use unifier_core::json::{first_price, first_string};
use unifier_core::{ProductRecord, Site};

const NAME_KEYS: &[&str] = &["title", "name"];
// last_price arrives in whatever unit the endpoint uses; it is carried
// through unconverted
const PRICE_KEYS: &[&str] = &["last_price", "yes_price", "price"];
const ID_KEYS: &[&str] = &["id", "ticker"];

/// Build records from a JSON catalog object.
///
/// Items live under `markets` (the v2 endpoint) or `data`; any other shape
/// yields no records.
pub fn records_from_json(data: &Value, page_url: &str) -> Vec<ProductRecord> {
    let items = match data
        .get("markets")
        .or_else(|| data.get("data"))
        .and_then(Value::as_array)
    {
        Some(items) => items,
        None => return Vec::new(),
    };

    items
        .iter()
        .map(|item| {
            let name = first_string(item, NAME_KEYS).unwrap_or_default();
            let product_id = first_string(item, ID_KEYS).unwrap_or_else(|| name.clone());
            ProductRecord {
                site: Site::Kalshi,
                product_id,
                name,
                price: first_price(item, PRICE_KEYS),
                url: Some(first_string(item, &["url"]).unwrap_or_else(|| page_url.to_string())),
            }
        })
        .collect()
}

/// Fallback for HTML payloads: the text of every anchor that links into
/// `/markets/` becomes a name-only record.
pub fn records_from_html(body: &str, page_url: &str) -> Vec<ProductRecord> {
    let selector = Selector::parse(r#"a[href*="/markets/"]"#).expect("market link selector");
    let document = Html::parse_document(body);

    document
        .select(&selector)
        .filter_map(|anchor| {
            let name = anchor
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if name.is_empty() {
                return None;
            }
            Some(ProductRecord {
                site: Site::Kalshi,
                product_id: name.clone(),
                name,
                price: None,
                url: Some(page_url.to_string()),
            })
        })
        .collect()
}
