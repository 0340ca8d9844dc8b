//! Name normalization applied before any similarity comparison

/// Normalize a product name for comparison.
///
/// Lower-cases the input, turns every character that is not an ASCII
/// letter or digit into a space, and collapses whitespace runs to single
/// spaces. The result is trimmed, so two names differing only in casing,
/// punctuation, or spacing normalize to the same string. Stored names and
/// aliases keep their original spelling; this is comparison-only.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing_and_punctuation_fold_together() {
        assert_eq!(normalize("  Will BTC -- hit $100K?! "), "will btc hit 100k");
        assert_eq!(
            normalize("Will BTC hit 100k"),
            normalize("will btc. hit (100k)")
        );
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(normalize("a\t\tb\n c"), "a b c");
    }

    #[test]
    fn test_non_ascii_becomes_space() {
        assert_eq!(normalize("Tesla®  stock… above   €300"), "tesla stock above 300");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ???"), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("Trump wins the 2024 presidential election!");
        assert_eq!(normalize(&once), once);
    }
}
