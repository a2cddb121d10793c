//! CLI command handlers.

pub mod config;
pub mod list;
pub mod migrate;
pub mod replay;
pub mod review;
pub mod stats;
