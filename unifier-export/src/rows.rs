//! Flat CSV row model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use unifier_core::{Site, UnifiedProduct};

/// One exported CSV row. Each entry of a unified group becomes a row
/// carrying the group's canonical name and confidence.
///
/// Field order here fixes the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub name: String,
    pub site: Site,
    pub product_id: String,
    /// Empty CSV field when the source quoted no price.
    pub price: Option<Decimal>,
    #[serde(serialize_with = "two_decimal_places")]
    pub confidence: f64,
}

fn two_decimal_places<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{:.2}", value))
}

/// Flattens unified groups into export rows, preserving group order and
/// entry order within each group.
pub fn to_rows(groups: &[UnifiedProduct]) -> Vec<ExportRow> {
    groups
        .iter()
        .flat_map(|group| {
            group.entries.iter().map(move |entry| ExportRow {
                name: group.name.clone(),
                site: entry.site,
                product_id: entry.product_id.clone(),
                price: entry.price,
                confidence: group.confidence,
            })
        })
        .collect()
}
