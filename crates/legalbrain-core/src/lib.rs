//! legalbrain-core
//!
//! Pure domain types for the legal-pack analysis rules and reports.
//! No transport or runtime dependency. This is the shared vocabulary of
//! the rule synchronization engine and the upload workflow.

pub mod error;
pub mod models;
