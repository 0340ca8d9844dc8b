//! Polymarket integration for the Prediction Market Unifier
//!
//! Scrapes the public Gamma catalog endpoint into product records. JSON
//! array payloads are read field by field; anything else falls back to
//! harvesting `"title"` literals out of the raw body.

pub mod client;
pub mod parse;

pub use client::PolymarketClient;
