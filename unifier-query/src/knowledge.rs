//! Knowledge base loaded from pipeline artifacts.

use std::path::Path;

use tracing::{error, info, warn};
use unifier_export::{read_rows, ExportRow};

/// CSV artifact consumed as structured knowledge.
pub const CSV_FILE_NAME: &str = "unified_products.csv";
/// Report artifact consumed as free-text knowledge.
pub const REPORT_FILE_NAME: &str = "report.md";

/// Text blocks plus, when the CSV parsed cleanly, its structured rows.
///
/// Loading never fails: a missing file is skipped with a warning and a
/// malformed CSV becomes an error block so the failure is visible in
/// context answers.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    blocks: Vec<String>,
    rows: Option<Vec<ExportRow>>,
}

impl KnowledgeBase {
    /// Loads `unified_products.csv` and `report.md` from `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut blocks = Vec::new();
        let mut rows = None;

        let csv_path = dir.join(CSV_FILE_NAME);
        match std::fs::read_to_string(&csv_path) {
            Ok(text) => match read_rows(&text) {
                Ok(parsed) => {
                    info!("Loaded CSV with {} rows", parsed.len());
                    blocks.push(format!("CSV Data:\n{}", text));
                    rows = Some(parsed);
                }
                Err(e) => {
                    error!("CSV loading error: {}", e);
                    blocks.push(format!("CSV loading error: {}", e));
                }
            },
            Err(_) => warn!("CSV file not found at {}", csv_path.display()),
        }

        let report_path = dir.join(REPORT_FILE_NAME);
        match std::fs::read_to_string(&report_path) {
            Ok(content) => {
                info!("Loaded report with {} chars", content.len());
                blocks.push(format!("Report:\n{}", content));
            }
            Err(_) => warn!("Report file not found at {}", report_path.display()),
        }

        KnowledgeBase { blocks, rows }
    }

    /// True when neither artifact could be read.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Structured CSV rows, when the CSV loaded and parsed.
    pub fn rows(&self) -> Option<&[ExportRow]> {
        self.rows.as_deref()
    }
}
