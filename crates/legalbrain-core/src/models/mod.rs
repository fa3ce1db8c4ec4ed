pub mod catalog;
pub mod pack;
pub mod report;
pub mod rule;
