//! Helpers for pulling loosely-typed fields out of scraped JSON
//!
//! Catalog payloads differ per site and drift over time, so scrapers read
//! them as `serde_json::Value` and probe a precedence list of keys instead
//! of deserializing into fixed structs.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

/// First key in `keys` that holds a non-empty string (numbers are accepted
/// and rendered in decimal).
pub fn first_string(item: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match item.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First key in `keys` that parses as a price.
pub fn first_price(item: &Value, keys: &[&str]) -> Option<Decimal> {
    keys.iter().find_map(|key| decimal_field(item.get(*key)?))
}

/// The safe-float rule: numbers and numeric strings become a `Decimal`;
/// null, NaN, infinities and garbage collapse to `None`.
pub fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            n.as_f64().and_then(Decimal::from_f64)
        }
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}
