//! CLI command handlers.

pub mod config;
pub mod list;
pub mod practice;
pub mod stats;
