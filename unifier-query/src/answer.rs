//! Keyword-dispatch question answering.

use rust_decimal::Decimal;
use tracing::info;
use unifier_core::Site;
use unifier_export::ExportRow;

use crate::knowledge::KnowledgeBase;

const HIGH_CONFIDENCE: f64 = 0.8;

/// Answers a free-text question from the knowledge base.
///
/// Questions mentioning "common" get a site frequency answer, "expensive"
/// or "price" the highest-priced market, "confidence" aggregate
/// confidence statistics. Anything else echoes the relevant context.
/// Always returns an answer string, never an error.
pub fn answer_question(knowledge: &KnowledgeBase, question: &str) -> String {
    if knowledge.is_empty() {
        return "No knowledge files found. Please run the unifier pipeline first to generate \
                the CSV and report."
            .to_string();
    }

    let question_lower = question.to_lowercase();
    let relevant: Vec<&str> = knowledge
        .blocks()
        .iter()
        .filter(|block| {
            let block_lower = block.to_lowercase();
            question_lower
                .split_whitespace()
                .any(|word| block_lower.contains(word))
        })
        .map(|block| block.as_str())
        .collect();
    let context = if relevant.is_empty() {
        knowledge.blocks().join("\n\n")
    } else {
        relevant.join("\n\n")
    };

    if question_lower.contains("common") {
        if let Some(rows) = knowledge.rows() {
            let (site, count) = most_common_site(rows);
            info!("Answered: most common site");
            return format!(
                "Based on the data, the most common site is: {} with {} products.",
                site, count
            );
        }
        return format!(
            "Based on the available data:\n\n{}\n\nFrom analyzing this data, I can see the \
             information but need to examine the specific values to determine what's most common.",
            context
        );
    }

    if question_lower.contains("expensive") || question_lower.contains("price") {
        if let Some(rows) = knowledge.rows() {
            if let Some((row, price)) = most_expensive_row(rows) {
                info!("Answered: most expensive market");
                return format!(
                    "Based on the data, the most expensive market is: {} with a price of {} on {}.",
                    row.name, price, row.site
                );
            }
        }
        return format!(
            "Based on the available data:\n\n{}\n\nFrom analyzing this data, I can see pricing \
             information but prices are empty; cannot determine most expensive markets.",
            context
        );
    }

    if question_lower.contains("confidence") {
        if let Some(rows) = knowledge.rows() {
            if !rows.is_empty() {
                let average = rows.iter().map(|row| row.confidence).sum::<f64>()
                    / rows.len() as f64;
                let high_count = rows
                    .iter()
                    .filter(|row| row.confidence > HIGH_CONFIDENCE)
                    .count();
                info!("Answered: confidence stats");
                return format!(
                    "Based on the data, the average confidence level is: {:.2}. There are {} \
                     products with high confidence (>0.8).",
                    average, high_count
                );
            }
        }
        return format!(
            "Based on the available data:\n\n{}\n\nFrom analyzing this data, I can see \
             confidence levels but need to examine the specific values to provide detailed \
             statistics.",
            context
        );
    }

    info!("Answered: generic summary");
    format!(
        "Based on the available data:\n\n{}\n\nI've found relevant information for your \
         question. The data shows various prediction markets across different sites with \
         pricing and confidence information.",
        context
    )
}

/// Site with the most rows. Ties go to the site seen first in the CSV.
fn most_common_site(rows: &[ExportRow]) -> (String, usize) {
    let mut counts: Vec<(Site, usize)> = Vec::new();
    for row in rows {
        match counts.iter_mut().find(|(site, _)| *site == row.site) {
            Some((_, count)) => *count += 1,
            None => counts.push((row.site, 1)),
        }
    }

    let mut best: Option<(Site, usize)> = None;
    for (site, count) in counts {
        let replace = match best {
            Some((_, best_count)) => count > best_count,
            None => true,
        };
        if replace {
            best = Some((site, count));
        }
    }
    match best {
        Some((site, count)) => (site.as_str().to_string(), count),
        None => ("No data".to_string(), 0),
    }
}

/// First row carrying the highest price, skipping unpriced rows.
fn most_expensive_row(rows: &[ExportRow]) -> Option<(&ExportRow, Decimal)> {
    let mut best: Option<(&ExportRow, Decimal)> = None;
    for row in rows {
        if let Some(price) = row.price {
            let replace = match best {
                Some((_, best_price)) => price > best_price,
                None => true,
            };
            if replace {
                best = Some((row, price));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{CSV_FILE_NAME, REPORT_FILE_NAME};

    const SAMPLE_CSV: &str = "name,site,product_id,price,confidence\n\
        Will Trump win the 2024 presidential election?,polymarket,pm_001,0.45,0.60\n\
        Trump wins the 2024 presidential election,kalshi,ks_001,0.47,0.98\n\
        Bitcoin price above $100k by end of 2024?,polymarket,pm_002,0.32,1.00\n";

    fn knowledge_from(csv: Option<&str>, report: Option<&str>) -> KnowledgeBase {
        let dir = tempfile::tempdir().expect("tempdir");
        if let Some(text) = csv {
            std::fs::write(dir.path().join(CSV_FILE_NAME), text).expect("write csv");
        }
        if let Some(text) = report {
            std::fs::write(dir.path().join(REPORT_FILE_NAME), text).expect("write report");
        }
        KnowledgeBase::load(dir.path())
    }

    #[test]
    fn test_no_knowledge_asks_for_a_run() {
        let knowledge = knowledge_from(None, None);
        assert_eq!(
            answer_question(&knowledge, "what is going on?"),
            "No knowledge files found. Please run the unifier pipeline first to generate the \
             CSV and report."
        );
    }

    #[test]
    fn test_most_common_site_counts_rows() {
        let knowledge = knowledge_from(Some(SAMPLE_CSV), None);
        assert_eq!(
            answer_question(&knowledge, "What is the most common site?"),
            "Based on the data, the most common site is: polymarket with 2 products."
        );
    }

    #[test]
    fn test_most_common_tie_goes_to_first_seen() {
        let csv = "name,site,product_id,price,confidence\n\
            A,kalshi,k1,0.1,0.60\n\
            B,polymarket,p1,0.2,0.60\n\
            C,polymarket,p2,0.3,0.60\n\
            D,kalshi,k2,0.4,0.60\n";
        let knowledge = knowledge_from(Some(csv), None);
        assert_eq!(
            answer_question(&knowledge, "most common site?"),
            "Based on the data, the most common site is: kalshi with 2 products."
        );
    }

    #[test]
    fn test_most_common_on_empty_table_reports_no_data() {
        let csv = "name,site,product_id,price,confidence\n";
        let knowledge = knowledge_from(Some(csv), None);
        assert_eq!(
            answer_question(&knowledge, "What is the most common site?"),
            "Based on the data, the most common site is: No data with 0 products."
        );
    }

    #[test]
    fn test_most_common_without_table_falls_back_to_context() {
        let knowledge = knowledge_from(None, Some("# Report\nA quiet market day."));
        let answer = answer_question(&knowledge, "what is the most common site?");
        assert!(answer.starts_with("Based on the available data:"));
        assert!(answer.contains("determine what's most common"));
        assert!(answer.contains("A quiet market day."));
    }

    #[test]
    fn test_expensive_picks_highest_price() {
        let knowledge = knowledge_from(Some(SAMPLE_CSV), None);
        assert_eq!(
            answer_question(&knowledge, "Which market is most expensive?"),
            "Based on the data, the most expensive market is: Trump wins the 2024 presidential \
             election with a price of 0.47 on kalshi."
        );
    }

    #[test]
    fn test_price_keyword_routes_to_expensive_branch() {
        let knowledge = knowledge_from(Some(SAMPLE_CSV), None);
        let answer = answer_question(&knowledge, "what has the best price?");
        assert!(answer.contains("the most expensive market is:"));
    }

    #[test]
    fn test_expensive_without_prices_falls_back_to_context() {
        let csv = "name,site,product_id,price,confidence\n\
            A,kalshi,k1,,0.60\n\
            B,polymarket,p1,,0.60\n";
        let knowledge = knowledge_from(Some(csv), None);
        let answer = answer_question(&knowledge, "most expensive?");
        assert!(answer.starts_with("Based on the available data:"));
        assert!(answer.contains("prices are empty; cannot determine most expensive markets."));
    }

    #[test]
    fn test_confidence_reports_average_and_high_count() {
        let knowledge = knowledge_from(Some(SAMPLE_CSV), None);
        assert_eq!(
            answer_question(&knowledge, "How is the confidence looking?"),
            "Based on the data, the average confidence level is: 0.86. There are 2 products \
             with high confidence (>0.8)."
        );
    }

    #[test]
    fn test_confidence_on_empty_table_falls_back_to_context() {
        let csv = "name,site,product_id,price,confidence\n";
        let knowledge = knowledge_from(Some(csv), None);
        let answer = answer_question(&knowledge, "confidence stats?");
        assert!(answer.starts_with("Based on the available data:"));
        assert!(answer.contains("confidence levels but need to examine"));
    }

    #[test]
    fn test_generic_question_echoes_relevant_context() {
        let knowledge = knowledge_from(Some(SAMPLE_CSV), Some("# Report\nMarkets look calm."));
        let answer = answer_question(&knowledge, "tell me about the markets");
        assert!(answer.starts_with("Based on the available data:"));
        assert!(
            answer.contains("Markets look calm."),
            "the report block mentions markets so it is relevant"
        );
        assert!(answer.contains("The data shows various prediction markets"));
    }

    #[test]
    fn test_no_matching_words_uses_all_blocks() {
        let knowledge = knowledge_from(Some(SAMPLE_CSV), Some("# Report\nQuiet day."));
        let answer = answer_question(&knowledge, "zzz qqq");
        assert!(answer.contains("CSV Data:"));
        assert!(answer.contains("Quiet day."));
    }
}
