//! Markdown analysis report.
//!
//! Summarizes a unification run: which markets trade on multiple sites,
//! how far their prices diverge, and where the divergence is wide enough
//! to look like an arbitrage opportunity.

use chrono::{DateTime, Utc};
use itertools::{Itertools, MinMaxResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use unifier_core::UnifiedProduct;

/// Spreads above this percentage are flagged as arbitrage opportunities.
const ARBITRAGE_SPREAD_PCT: Decimal = dec!(5);

/// High-confidence cutoff used in the data quality metrics.
const HIGH_CONFIDENCE: f64 = 0.8;

/// Lowest and highest quoted price across a group's entries.
pub fn price_range(group: &UnifiedProduct) -> Option<(Decimal, Decimal)> {
    match group.entries.iter().filter_map(|entry| entry.price).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(price) => Some((price, price)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// Price spread `(max - min) / min * 100`, rounded to one decimal place.
///
/// Defined only for groups with at least two quoted prices and a
/// non-zero minimum. A spread too large for `Decimal` is also `None`.
pub fn price_spread_percent(group: &UnifiedProduct) -> Option<Decimal> {
    match group.entries.iter().filter_map(|entry| entry.price).minmax() {
        MinMaxResult::MinMax(min, max) if !min.is_zero() => max
            .checked_sub(min)
            .and_then(|gap| gap.checked_div(min))
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .map(|spread| spread.round_dp(1)),
        _ => None,
    }
}

/// Whether a group's price spread exceeds the arbitrage threshold.
pub fn is_arbitrage_opportunity(group: &UnifiedProduct) -> bool {
    price_spread_percent(group)
        .map(|spread| spread > ARBITRAGE_SPREAD_PCT)
        .unwrap_or(false)
}

/// Renders the markdown analysis report for a unification run.
pub fn render_report(groups: &[UnifiedProduct], generated_at: DateTime<Utc>) -> String {
    let total_entries: usize = groups.iter().map(|group| group.entries.len()).sum();
    let multi_entry: Vec<&UnifiedProduct> =
        groups.iter().filter(|group| !group.is_singleton()).collect();
    let singleton_count = groups.len() - multi_entry.len();
    let arbitrage_count = groups
        .iter()
        .filter(|group| is_arbitrage_opportunity(group))
        .count();

    let mut sites: Vec<&str> = Vec::new();
    for group in groups {
        for site in group.sites() {
            if !sites.contains(&site.display_name()) {
                sites.push(site.display_name());
            }
        }
    }

    let mut doc = String::new();
    doc.push_str("# Prediction Market Unification Analysis Report\n\n");
    doc.push_str(&format!(
        "*Generated on: {}*\n\n",
        generated_at.format("%B %d, %Y")
    ));

    doc.push_str("## Executive Summary\n\n");
    if groups.is_empty() {
        doc.push_str("No product listings were available for this run.\n\n");
    } else {
        doc.push_str(&format!(
            "This report analyzes {} product listings unified into {} market groups across {} site(s): {}.\n\n",
            total_entries,
            groups.len(),
            sites.len(),
            sites.join(", ")
        ));
    }

    if !multi_entry.is_empty() {
        doc.push_str("## Key Findings\n\n");
        for (index, group) in multi_entry.iter().enumerate() {
            doc.push_str(&format!("### {}. {}\n\n", index + 1, group.name));
            doc.push_str(&format!(
                "- **Sites**: {}\n",
                group
                    .sites()
                    .iter()
                    .map(|site| site.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
            match price_range(group) {
                Some((min, max)) => {
                    doc.push_str(&format!("- **Price Range**: ${} - ${}\n", min, max));
                }
                None => doc.push_str("- **Price Range**: no quotes\n"),
            }
            match price_spread_percent(group) {
                Some(spread) => {
                    doc.push_str(&format!("- **Variation**: {}% spread across sites\n", spread));
                    if spread > ARBITRAGE_SPREAD_PCT {
                        doc.push_str(&format!(
                            "- **Opportunity**: Arbitrage potential (spread above {}%)\n",
                            ARBITRAGE_SPREAD_PCT
                        ));
                    } else {
                        doc.push_str("- **Opportunity**: Prices broadly aligned\n");
                    }
                }
                None => doc.push_str("- **Variation**: not enough quotes to compare\n"),
            }
            doc.push('\n');
        }
    }

    if singleton_count > 0 {
        doc.push_str("## Singleton Listings\n\n");
        doc.push_str(&format!(
            "{} listing(s) matched no product on any other site.\n\n",
            singleton_count
        ));
    }

    doc.push_str("## Data Quality Metrics\n\n");
    doc.push_str(&format!(
        "- **Total Products**: {} records in {} groups\n",
        total_entries,
        groups.len()
    ));
    let mean_confidence = if groups.is_empty() {
        0.0
    } else {
        groups.iter().map(|group| group.confidence).sum::<f64>() / groups.len() as f64
    };
    doc.push_str(&format!(
        "- **Average Match Confidence**: {:.2}\n",
        mean_confidence
    ));
    doc.push_str(&format!(
        "- **High Confidence Groups (>{})**: {}\n",
        HIGH_CONFIDENCE,
        groups
            .iter()
            .filter(|group| group.confidence > HIGH_CONFIDENCE)
            .count()
    ));
    doc.push_str(&format!("- **Arbitrage Opportunities**: {}\n", arbitrage_count));

    doc.push_str("\n---\n");
    doc.push_str("*This report was generated automatically by the Prediction Market Unifier*\n");
    doc
}
