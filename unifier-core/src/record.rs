//! Scraped product records

use crate::site::Site;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single product listing observed on one source site.
///
/// Records are immutable once created: scrapers build them, the grouping
/// engine consumes them, and the owning group keeps them for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Source the record was scraped from
    pub site: Site,
    /// Source-local identifier (derived from the name when the source
    /// exposes no real ID)
    pub product_id: String,
    /// Human-readable market/question text; may be empty on malformed input
    pub name: String,
    /// Quoted price, when one parsed cleanly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Source URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
