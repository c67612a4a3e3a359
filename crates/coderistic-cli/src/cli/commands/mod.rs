//! CLI command handlers.

pub mod config;
pub mod posts;
pub mod read;
pub mod reader;
pub mod wisdom;
