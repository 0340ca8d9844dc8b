//! Site definitions for the scraped sources

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported product sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Site {
    /// Polymarket - crypto-based prediction market
    Polymarket,
    /// Kalshi - US regulated prediction market
    Kalshi,
    /// Generic prediction-market catalog site
    PredictionMarket,
    /// Arbitrary web page harvested for market-like text
    Browser,
}

impl Site {
    /// Wire identifier used in the CSV `site` column and raw JSON keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Polymarket => "polymarket",
            Site::Kalshi => "kalshi",
            Site::PredictionMarket => "prediction-market",
            Site::Browser => "browser",
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Site::Polymarket => "Polymarket",
            Site::Kalshi => "Kalshi",
            Site::PredictionMarket => "Prediction Market",
            Site::Browser => "Browser",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polymarket" => Ok(Site::Polymarket),
            "kalshi" => Ok(Site::Kalshi),
            "prediction-market" | "prediction_market" => Ok(Site::PredictionMarket),
            "browser" => Ok(Site::Browser),
            _ => Err(format!("Unknown site: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_wire_strings() {
        assert_eq!(Site::Polymarket.as_str(), "polymarket");
        assert_eq!(Site::Kalshi.as_str(), "kalshi");
        assert_eq!(Site::PredictionMarket.as_str(), "prediction-market");
        assert_eq!(Site::Browser.as_str(), "browser");
    }

    #[test]
    fn test_site_serde_matches_wire_string() {
        for site in [
            Site::Polymarket,
            Site::Kalshi,
            Site::PredictionMarket,
            Site::Browser,
        ] {
            let json = serde_json::to_string(&site).unwrap();
            assert_eq!(json, format!("\"{}\"", site.as_str()));
            let back: Site = serde_json::from_str(&json).unwrap();
            assert_eq!(back, site);
        }
    }

    #[test]
    fn test_site_from_str_accepts_legacy_spellings() {
        assert_eq!("Polymarket".parse::<Site>(), Ok(Site::Polymarket));
        assert_eq!(
            "prediction_market".parse::<Site>(),
            Ok(Site::PredictionMarket)
        );
        assert_eq!(
            "PREDICTION-MARKET".parse::<Site>(),
            Ok(Site::PredictionMarket)
        );
        assert!("betfair".parse::<Site>().is_err());
    }
}
