//! Core types for the Prediction Market Unifier
//!
//! This crate defines the shared data structures used across the unifier,
//! including scraped product records, unified product groups, and the
//! site abstraction.

pub mod error;
pub mod group;
pub mod json;
pub mod record;
pub mod site;

pub use error::{UnifierError, UnifierResult};
pub use group::UnifiedProduct;
pub use record::ProductRecord;
pub use site::Site;
