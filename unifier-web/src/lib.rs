//! Generic web scrapers for the Prediction Market Unifier
//!
//! Two clients live here: `MarketSiteClient` reads a catalog from any
//! prediction-market-style site (JSON first, market cards as fallback),
//! and `PageTextClient` harvests market-like text from an arbitrary page.

pub mod extract;
pub mod market_site;
pub mod page_text;

pub use market_site::MarketSiteClient;
pub use page_text::PageTextClient;
