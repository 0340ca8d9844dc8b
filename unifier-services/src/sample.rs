//! Bundled sample dataset for offline demo runs.

use rust_decimal_macros::dec;
use unifier_core::{ProductRecord, Site};

/// Eight hand-written market listings across three sites.
///
/// The election and bitcoin markets appear on all three sites under
/// slightly different names, tesla on two, so a demo run unifies them
/// into three groups with one same-name pair and visible price spreads.
pub fn sample_records() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            site: Site::Polymarket,
            product_id: "pm_001".to_string(),
            name: "Will Trump win the 2024 presidential election?".to_string(),
            price: Some(dec!(0.45)),
            url: Some("https://polymarket.com/event/trump-2024".to_string()),
        },
        ProductRecord {
            site: Site::Polymarket,
            product_id: "pm_002".to_string(),
            name: "Bitcoin price above $100k by end of 2024?".to_string(),
            price: Some(dec!(0.32)),
            url: Some("https://polymarket.com/event/btc-100k-2024".to_string()),
        },
        ProductRecord {
            site: Site::Polymarket,
            product_id: "pm_003".to_string(),
            name: "Tesla stock above $300 by Q2 2024?".to_string(),
            price: Some(dec!(0.28)),
            url: Some("https://polymarket.com/event/tsla-300-q2".to_string()),
        },
        ProductRecord {
            site: Site::Kalshi,
            product_id: "ks_001".to_string(),
            name: "Trump wins the 2024 presidential election".to_string(),
            price: Some(dec!(0.47)),
            url: Some("https://kalshi.com/markets/trump-2024-win".to_string()),
        },
        ProductRecord {
            site: Site::Kalshi,
            product_id: "ks_002".to_string(),
            name: "Bitcoin price above $100k by end of 2024".to_string(),
            price: Some(dec!(0.35)),
            url: Some("https://kalshi.com/markets/btc-100k-2024".to_string()),
        },
        ProductRecord {
            site: Site::Kalshi,
            product_id: "ks_003".to_string(),
            name: "Tesla stock above $300 by Q2 2024".to_string(),
            price: Some(dec!(0.25)),
            url: Some("https://kalshi.com/markets/tsla-300-q2-2024".to_string()),
        },
        ProductRecord {
            site: Site::PredictionMarket,
            product_id: "pm_004".to_string(),
            name: "Trump to win the 2024 presidential election".to_string(),
            price: Some(dec!(0.46)),
            url: Some("https://prediction-market.com/events/trump-2024".to_string()),
        },
        ProductRecord {
            site: Site::PredictionMarket,
            product_id: "pm_005".to_string(),
            name: "Will Bitcoin price be above $100k by end of 2024?".to_string(),
            price: Some(dec!(0.33)),
            url: Some("https://prediction-market.com/events/bitcoin-100k".to_string()),
        },
    ]
}
