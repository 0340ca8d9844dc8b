//! Unified product groups

use crate::record::ProductRecord;
use crate::site::Site;
use serde::{Deserialize, Serialize};

/// A cluster of records believed to describe the same real-world market.
///
/// Groups are append-only: once created they are never merged, split, or
/// deleted, and every record belongs to exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedProduct {
    /// Canonical display name, fixed to the name of the record that
    /// created the group
    pub name: String,
    /// Distinct raw spellings seen across the group, in insertion order
    pub aliases: Vec<String>,
    /// Member records, in arrival order
    pub entries: Vec<ProductRecord>,
    /// Match confidence in [0, 1]; never decreases
    pub confidence: f64,
}

impl UnifiedProduct {
    /// Open a new group around its first record.
    pub fn seeded(record: ProductRecord, confidence: f64) -> Self {
        Self {
            name: record.name.clone(),
            aliases: vec![record.name.clone()],
            entries: vec![record],
            confidence,
        }
    }

    /// Add a record that matched this group with the given similarity score.
    ///
    /// The score is folded into the confidence: confidence only ever rises,
    /// and is capped at 1.0. A spelling already present in `aliases` is not
    /// repeated.
    pub fn absorb(&mut self, record: ProductRecord, score: f64) {
        if !self.aliases.contains(&record.name) {
            self.aliases.push(record.name.clone());
        }
        self.confidence = self.confidence.max(score).min(1.0);
        self.entries.push(record);
    }

    /// Sites represented in this group, first occurrence order.
    pub fn sites(&self) -> Vec<Site> {
        let mut sites = Vec::new();
        for entry in &self.entries {
            if !sites.contains(&entry.site) {
                sites.push(entry.site);
            }
        }
        sites
    }

    pub fn is_singleton(&self) -> bool {
        self.entries.len() == 1
    }
}
