//! End-to-end unification pipeline.
//!
//! One run takes product records (scraped or prepared), unifies them,
//! and writes every artifact into the output directory: the raw records
//! grouped by site, the unified CSV, the markdown report, an answered
//! question over the generated files, and an execution summary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use unifier_core::{ProductRecord, UnifierError, UnifierResult};
use unifier_export::{is_arbitrage_opportunity, render_report, to_rows, write_csv};
use unifier_match::MatchEngine;
use unifier_query::knowledge::{CSV_FILE_NAME, REPORT_FILE_NAME};
use unifier_query::{answer_question, KnowledgeBase};

use crate::scrape::{ScrapeService, SourceSpec};

/// Raw scraped records, grouped by site.
pub const RAW_PRODUCTS_FILE_NAME: &str = "raw_products.json";
/// Question and answer produced at the end of a run.
pub const CHAT_OUTPUT_FILE_NAME: &str = "rag_chat_output.md";
/// Machine-readable run summary.
pub const SUMMARY_FILE_NAME: &str = "execution_summary.json";

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_QUESTION: &str = "What is the most common site?";

/// Where a run writes its artifacts and which question it answers.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub question: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            question: DEFAULT_QUESTION.to_string(),
        }
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCounts {
    pub raw_products: usize,
    pub sites: usize,
    pub unified_groups: usize,
    pub csv_rows: usize,
    pub arbitrage_opportunities: usize,
}

/// Summary written as `execution_summary.json` and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub status: String,
    pub timestamp: String,
    pub output_files: BTreeMap<String, String>,
    pub counts: RunCounts,
}

/// Drives a full unification run.
pub struct UnifierPipeline {
    engine: MatchEngine,
    config: PipelineConfig,
}

impl UnifierPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            engine: MatchEngine::default(),
            config,
        }
    }

    /// Replaces the default matching engine, e.g. with a different
    /// threshold or similarity algorithm.
    pub fn with_engine(mut self, engine: MatchEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Scrapes the given sources, then runs the pipeline over whatever
    /// they returned.
    #[instrument(skip(self, scraper, sources))]
    pub async fn run_remote(
        &self,
        scraper: &ScrapeService,
        sources: &[SourceSpec],
    ) -> UnifierResult<ExecutionSummary> {
        let records = scraper.fetch_all(sources).await;
        self.run(records)
    }

    /// Unifies the records and writes all artifacts.
    #[instrument(skip(self, records))]
    pub fn run(&self, records: Vec<ProductRecord>) -> UnifierResult<ExecutionSummary> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| {
            UnifierError::io(format!("Failed to create {}: {}", output_dir.display(), e))
        })?;
        info!("Pipeline run started, writing to {}", output_dir.display());

        let raw_path = output_dir.join(RAW_PRODUCTS_FILE_NAME);
        write_raw_products(&raw_path, &records)?;
        let raw_count = records.len();
        let site_count = distinct_sites(&records);

        let groups = self.engine.match_records(records);
        let rows = to_rows(&groups);

        let csv_path = output_dir.join(CSV_FILE_NAME);
        write_csv(&csv_path, &rows)?;
        info!("Wrote {} CSV rows to {}", rows.len(), csv_path.display());

        let report_path = output_dir.join(REPORT_FILE_NAME);
        let report = render_report(&groups, Utc::now());
        std::fs::write(&report_path, report).map_err(|e| {
            UnifierError::io(format!("Failed to write {}: {}", report_path.display(), e))
        })?;
        info!("Wrote report to {}", report_path.display());

        let knowledge = KnowledgeBase::load(output_dir);
        let answer = answer_question(&knowledge, &self.config.question);
        let chat_path = output_dir.join(CHAT_OUTPUT_FILE_NAME);
        let chat_doc = format!(
            "# Question\n\n{}\n\n# Answer\n\n{}\n",
            self.config.question, answer
        );
        std::fs::write(&chat_path, chat_doc).map_err(|e| {
            UnifierError::io(format!("Failed to write {}: {}", chat_path.display(), e))
        })?;

        let arbitrage_count = groups
            .iter()
            .filter(|group| is_arbitrage_opportunity(group))
            .count();
        let mut output_files = BTreeMap::new();
        output_files.insert("raw_products".to_string(), raw_path.display().to_string());
        output_files.insert("unified_products".to_string(), csv_path.display().to_string());
        output_files.insert("report".to_string(), report_path.display().to_string());
        output_files.insert("rag_chat".to_string(), chat_path.display().to_string());

        let summary = ExecutionSummary {
            status: "success".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            output_files,
            counts: RunCounts {
                raw_products: raw_count,
                sites: site_count,
                unified_groups: groups.len(),
                csv_rows: rows.len(),
                arbitrage_opportunities: arbitrage_count,
            },
        };

        let summary_path = output_dir.join(SUMMARY_FILE_NAME);
        let summary_json = serde_json::to_string_pretty(&summary).map_err(|e| {
            UnifierError::internal(format!("Failed to encode execution summary: {}", e))
        })?;
        std::fs::write(&summary_path, summary_json).map_err(|e| {
            UnifierError::io(format!("Failed to write {}: {}", summary_path.display(), e))
        })?;

        info!(
            "Pipeline complete: {} groups from {} records, {} arbitrage opportunities",
            summary.counts.unified_groups, raw_count, arbitrage_count
        );
        Ok(summary)
    }
}

fn distinct_sites(records: &[ProductRecord]) -> usize {
    let mut sites = Vec::new();
    for record in records {
        if !sites.contains(&record.site) {
            sites.push(record.site);
        }
    }
    sites.len()
}

/// Writes the pre-unification records grouped by site, keys sorted, so
/// reruns over the same data produce identical files.
fn write_raw_products(path: &Path, records: &[ProductRecord]) -> UnifierResult<()> {
    let mut by_site: BTreeMap<&str, Vec<&ProductRecord>> = BTreeMap::new();
    for record in records {
        by_site.entry(record.site.as_str()).or_default().push(record);
    }
    let json = serde_json::to_string_pretty(&by_site)
        .map_err(|e| UnifierError::internal(format!("Failed to encode raw products: {}", e)))?;
    std::fs::write(path, json)
        .map_err(|e| UnifierError::io(format!("Failed to write {}: {}", path.display(), e)))
}
