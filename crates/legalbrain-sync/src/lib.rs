//! legalbrain-sync
//!
//! Client-side state for the rules dashboard and the pack upload page.
//!
//! [`engine::RuleSync`] mirrors the remote rule collection and only ever
//! reflects facts the rule store has confirmed. [`workflow::UploadWorkflow`]
//! drives a single analysis submission at a time. Both talk to the outside
//! world through the traits in [`remote`].

pub mod engine;
pub mod error;
pub mod remote;
pub mod view;
pub mod workflow;
