//! Resume document engine.
//!
//! Converts between the structured resume Markdown dialect and the typed
//! [`Document`] model, and derives export variants of a document under a
//! per-entry inclusion policy and an optional date window.
//!
//! ```text
//! raw text --parse--> Document --reconstruct--> Document --serialize--> canonical text
//! ```

pub mod config;
pub mod errors;
pub mod export;
pub mod markdown;
pub mod models;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use errors::{ParseResult, StructuralError, ValidationError};
pub use export::{reconstruct, reconstruct_with_rule, Inclusion, InclusionPolicy, WindowRule};
pub use markdown::{parse, serialize};
pub use models::{DateRange, Document, EntryRef, MonthYear};
