//! Orchestration layer for the Prediction Market Unifier
//!
//! This crate wires the platform scrapers, the matching engine and the
//! export surfaces into one pipeline: scrape (or take prepared records),
//! unify, write artifacts, answer a question over them.

pub mod pipeline;
pub mod sample;
pub mod scrape;

pub use pipeline::{ExecutionSummary, PipelineConfig, RunCounts, UnifierPipeline};
pub use sample::sample_records;
pub use scrape::{ScrapeService, SourceSpec};
