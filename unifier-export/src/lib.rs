//! Export surfaces for unified product groups.
//!
//! Two artifacts come out of a unification run: a flat CSV of every
//! product entry tagged with its group name and confidence, and a
//! markdown analysis report summarizing price spreads across sites.

pub mod report;
pub mod rows;
pub mod writer;

pub use report::{is_arbitrage_opportunity, price_spread_percent, render_report};
pub use rows::{to_rows, ExportRow};
pub use writer::{csv_string, read_rows, write_csv};
