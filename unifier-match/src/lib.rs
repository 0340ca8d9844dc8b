//! Product matching engine for the Prediction Market Unifier
//!
//! Takes the raw records scraped from every site and decides which of them
//! describe the same underlying market. Matching is name-based: names are
//! normalized, scored with a fuzzy similarity ratio, and folded into
//! unified groups in a single greedy pass.

pub mod engine;
pub mod normalize;
pub mod similarity;

pub use engine::{MatchEngine, MATCH_THRESHOLD, SEED_CONFIDENCE};
pub use normalize::normalize;
pub use similarity::{SimilarityAlgo, SimilarityScorer};
