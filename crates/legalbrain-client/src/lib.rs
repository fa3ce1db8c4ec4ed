//! legalbrain-client
//!
//! HTTP transport for the rules API and the legal pack analysis endpoint.
//! Thin wrapper around reqwest implementing the `legalbrain-sync` remote traits.

pub mod error;
pub mod http;
pub mod pack;
pub mod settings;
