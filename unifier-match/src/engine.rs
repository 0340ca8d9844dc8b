//! Incremental grouping engine

use crate::similarity::SimilarityScorer;
use tracing::{debug, info, instrument};
use unifier_core::{ProductRecord, UnifiedProduct};

/// Minimum similarity for a record to join an existing group
pub const MATCH_THRESHOLD: f64 = 0.78;
/// Confidence assigned to a freshly created singleton group
pub const SEED_CONFIDENCE: f64 = 0.6;

/// Single-pass greedy grouping engine.
///
/// Records are folded into groups in input order: each record joins the
/// first group, in creation order, whose canonical name scores at or above
/// the threshold, otherwise it opens a new group. The contract is
/// first-above-threshold, not best-scoring.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    scorer: SimilarityScorer,
    threshold: f64,
    seed_confidence: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(SimilarityScorer::default())
    }
}

impl MatchEngine {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self {
            scorer,
            threshold: MATCH_THRESHOLD,
            seed_confidence: SEED_CONFIDENCE,
        }
    }

    /// Override the join threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override the confidence given to new singleton groups.
    pub fn with_seed_confidence(mut self, seed_confidence: f64) -> Self {
        self.seed_confidence = seed_confidence;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scorer(&self) -> SimilarityScorer {
        self.scorer
    }

    /// Partition records into unified product groups.
    ///
    /// Order-sensitive: group names are fixed by whichever record arrives
    /// first, so feeding the same records in a different order can produce
    /// different memberships. The engine keeps no state between calls. A
    /// record whose name normalizes to empty never matches anything and
    /// always opens its own singleton group.
    #[instrument(skip(self, records))]
    pub fn match_records(&self, records: Vec<ProductRecord>) -> Vec<UnifiedProduct> {
        info!("Matching {} product records", records.len());

        let mut groups: Vec<UnifiedProduct> = Vec::new();
        for record in records {
            let matched = groups.iter().enumerate().find_map(|(idx, group)| {
                let score = self.scorer.score(&group.name, &record.name);
                (score >= self.threshold).then_some((idx, score))
            });

            match matched {
                Some((idx, score)) => {
                    debug!(
                        "'{}' joined group '{}' with score {:.3}",
                        record.name, groups[idx].name, score
                    );
                    groups[idx].absorb(record, score);
                }
                None => {
                    debug!("'{}' opened a new group", record.name);
                    groups.push(UnifiedProduct::seeded(record, self.seed_confidence));
                }
            }
        }

        info!("Created {} unified groups", groups.len());
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::SimilarityAlgo;
    use unifier_core::Site;

    fn record(site: Site, id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            site,
            product_id: id.to_string(),
            name: name.to_string(),
            price: None,
            url: None,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_same_market_across_sites_unifies() {
        let engine = MatchEngine::default();
        let groups = engine.match_records(vec![
            record(
                Site::Polymarket,
                "pm_001",
                "Will Trump win the 2024 presidential election?",
            ),
            record(
                Site::Kalshi,
                "ks_001",
                "Trump wins the 2024 presidential election",
            ),
            record(
                Site::PredictionMarket,
                "pm_004",
                "Trump to win the 2024 presidential election",
            ),
        ]);

        assert_eq!(groups.len(), 1, "all three spellings describe one market");
        let group = &groups[0];
        assert_eq!(group.name, "Will Trump win the 2024 presidential election?");
        assert_eq!(group.entries.len(), 3);
        assert_eq!(group.aliases.len(), 3);
        assert_close(group.confidence, 0.975610);
    }

    #[test]
    fn test_unrelated_records_stay_singletons_at_seed_confidence() {
        let engine = MatchEngine::default();
        let groups = engine.match_records(vec![
            record(Site::Polymarket, "pm_003", "Tesla stock above $300"),
            record(Site::Kalshi, "ks_002", "Bitcoin price above $100k"),
        ]);

        assert_eq!(groups.len(), 2);
        for group in &groups {
            assert!(group.is_singleton());
            assert_eq!(group.confidence, SEED_CONFIDENCE);
        }
    }

    #[test]
    fn test_input_order_changes_membership() {
        // A~B and B~C clear the threshold, A~C does not, so B's home group
        // depends on which of A and C arrived first.
        let a = "Oil price above $90 a barrel before July";
        let b = "Oil above $90 a barrel";
        let c = "Crude oil trades above $90 per barrel at any point in 2025";

        let scorer = SimilarityScorer::default();
        assert!(scorer.score(a, b) >= MATCH_THRESHOLD);
        assert!(scorer.score(b, c) >= MATCH_THRESHOLD);
        assert!(scorer.score(a, c) < MATCH_THRESHOLD);

        let engine = MatchEngine::default();

        let forward = engine.match_records(vec![
            record(Site::Polymarket, "1", a),
            record(Site::Kalshi, "2", b),
            record(Site::PredictionMarket, "3", c),
        ]);
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[0].name, a);
        assert_eq!(forward[0].entries.len(), 2, "B lands next to A");
        assert_eq!(forward[1].name, c);

        let reversed = engine.match_records(vec![
            record(Site::PredictionMarket, "3", c),
            record(Site::Kalshi, "2", b),
            record(Site::Polymarket, "1", a),
        ]);
        assert_eq!(reversed.len(), 2);
        assert_eq!(reversed[0].name, c);
        assert_eq!(reversed[0].entries.len(), 2, "B lands next to C");
        assert_eq!(reversed[1].name, a);
    }

    #[test]
    fn test_first_group_above_threshold_wins_over_better_match() {
        let first = "Bitcoin above $100k in 2024";
        let second = "Bitcoin price above $100k by end of 2024";
        let incoming = "Bitcoin price above $100k in 2024";

        // the later group actually scores higher for the incoming record
        let scorer = SimilarityScorer::default();
        assert!(scorer.score(first, second) < MATCH_THRESHOLD);
        assert!(scorer.score(first, incoming) >= MATCH_THRESHOLD);
        assert!(scorer.score(second, incoming) > scorer.score(first, incoming));

        let engine = MatchEngine::default();
        let groups = engine.match_records(vec![
            record(Site::Polymarket, "1", first),
            record(Site::Kalshi, "2", second),
            record(Site::PredictionMarket, "3", incoming),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].entries.len(),
            2,
            "record joins the earlier group even though the later one scores higher"
        );
        assert!(groups[1].is_singleton());
        assert_close(groups[0].confidence, 0.807692);
    }

    #[test]
    fn test_empty_names_never_unify() {
        let engine = MatchEngine::default();
        let groups = engine.match_records(vec![
            record(Site::Browser, "1", ""),
            record(Site::Browser, "2", ""),
            record(Site::Browser, "3", "Actual market name here"),
        ]);

        assert_eq!(groups.len(), 3, "empty names always open singletons");
        assert_eq!(groups[0].confidence, SEED_CONFIDENCE);
        assert_eq!(groups[1].confidence, SEED_CONFIDENCE);
    }

    #[test]
    fn test_every_record_lands_in_exactly_one_group() {
        let records = vec![
            record(Site::Polymarket, "1", "Will Trump win the 2024 presidential election?"),
            record(Site::Polymarket, "2", "Bitcoin price above $100k by end of 2024?"),
            record(Site::Kalshi, "3", "Trump wins the 2024 presidential election"),
            record(Site::Kalshi, "4", "Tesla stock above $300 by Q2 2024"),
            record(Site::PredictionMarket, "5", "Trump to win the 2024 presidential election"),
            record(Site::Browser, "6", ""),
        ];
        let total = records.len();

        let engine = MatchEngine::default();
        let groups = engine.match_records(records);

        let entries: usize = groups.iter().map(|g| g.entries.len()).sum();
        assert_eq!(entries, total, "no record may be dropped or duplicated");
    }

    #[test]
    fn test_matching_is_deterministic() {
        let records = || {
            vec![
                record(Site::Polymarket, "1", "Will Trump win the 2024 presidential election?"),
                record(Site::Kalshi, "2", "Trump wins the 2024 presidential election"),
                record(Site::Polymarket, "3", "Bitcoin price above $100k by end of 2024?"),
                record(Site::Kalshi, "4", "Bitcoin price above $100k by end of 2024"),
            ]
        };

        let engine = MatchEngine::default();
        assert_eq!(engine.match_records(records()), engine.match_records(records()));
    }

    #[test]
    fn test_confidence_is_monotonic_across_prefix_runs() {
        let records = vec![
            record(Site::Polymarket, "1", "Will Trump win the 2024 presidential election?"),
            record(Site::Kalshi, "2", "Trump wins the 2024 presidential election"),
            record(Site::Polymarket, "3", "Bitcoin price above $100k by end of 2024?"),
            record(Site::PredictionMarket, "4", "Trump to win the 2024 presidential election"),
        ];

        let engine = MatchEngine::default();
        let mut last = 0.0;
        for prefix in 1..=records.len() {
            let groups = engine.match_records(records[..prefix].to_vec());
            let confidence = groups[0].confidence;
            assert!(
                confidence >= last,
                "confidence of the first group dropped from {} to {}",
                last,
                confidence
            );
            last = confidence;
        }
    }

    #[test]
    fn test_threshold_override() {
        let a = "Oil price above $90 a barrel before July";
        let b = "Oil above $90 a barrel";
        let c = "Crude oil trades above $90 per barrel at any point in 2025";
        let records = || {
            vec![
                record(Site::Polymarket, "1", a),
                record(Site::Kalshi, "2", b),
                record(Site::PredictionMarket, "3", c),
            ]
        };

        let strict = MatchEngine::default().with_threshold(0.95);
        assert_eq!(strict.match_records(records()).len(), 3);

        let loose = MatchEngine::default().with_threshold(0.5);
        assert_eq!(loose.match_records(records()).len(), 1);
    }

    #[test]
    fn test_seed_confidence_override() {
        let engine = MatchEngine::default().with_seed_confidence(0.3);
        let groups = engine.match_records(vec![record(Site::Browser, "1", "Lone market")]);
        assert_eq!(groups[0].confidence, 0.3);
    }

    #[test]
    fn test_sequence_ratio_scorer_changes_grouping() {
        // these two unify under partial-ratio but not under the stricter
        // whole-string sequence ratio
        let a = "Oil price above $90 a barrel before July";
        let b = "Oil above $90 a barrel";
        let records = || {
            vec![
                record(Site::Polymarket, "1", a),
                record(Site::Kalshi, "2", b),
            ]
        };

        let partial = MatchEngine::new(SimilarityScorer::new(SimilarityAlgo::PartialRatio));
        assert_eq!(partial.match_records(records()).len(), 1);

        let sequence = MatchEngine::new(SimilarityScorer::new(SimilarityAlgo::SequenceRatio));
        assert_eq!(sequence.match_records(records()).len(), 2);
    }
}
