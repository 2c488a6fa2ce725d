pub mod common;
pub mod completions;
pub mod config;
pub mod conflicts;
pub mod entries;
pub mod resolve;
