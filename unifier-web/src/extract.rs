//! Shared HTML text extraction

use scraper::{Html, Selector};
use unifier_core::UnifierError;

/// Texts at or below this length are navigation noise, not market names
pub(crate) const MIN_TEXT_LEN: usize = 10;

/// Visible text of every element matching `selector`, one string per
/// element, with whitespace collapsed to single spaces.
pub fn element_texts(body: &str, selector: &str) -> Result<Vec<String>, UnifierError> {
    let parsed = Selector::parse(selector)
        .map_err(|e| UnifierError::parse(format!("Invalid CSS selector '{}': {}", selector, e)))?;
    let document = Html::parse_document(body);

    Ok(document
        .select(&parsed)
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect())
}

/// First `limit` characters of `text` (characters, not bytes, so
/// multi-byte names truncate cleanly).
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_texts_collapse_whitespace() {
        let body = "<div><a href=\"/x\">Will  Trump\n win?</a><a href=\"/y\"> </a></div>";
        let texts = element_texts(body, "a").unwrap();
        assert_eq!(texts, vec!["Will Trump win?".to_string(), String::new()]);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        assert!(element_texts("<html></html>", "a[[[").is_err());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ab", 4), "ab");
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }
}
