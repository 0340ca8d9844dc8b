//! Kalshi integration for the Prediction Market Unifier
//!
//! Scrapes the public market catalog into product records. JSON payloads
//! are read from the `markets`/`data` arrays; HTML payloads fall back to
//! harvesting market links.

pub mod client;
pub mod parse;

pub use client::KalshiClient;
