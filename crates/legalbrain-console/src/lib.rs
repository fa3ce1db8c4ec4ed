//! legalbrain-console library root.
//!
//! Config handling and dashboard rendering, exposed so integration tests can
//! exercise them without going through the binary.

pub mod config;
pub mod render;
