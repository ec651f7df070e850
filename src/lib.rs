//! Symbol indexer and search engine for TypeScript/JavaScript projects.
//!
//! [`extract::Extractor`] scans a project and writes `wiki/index.json` plus two
//! Markdown references; [`search::SearchEngine`] queries that index and falls
//! back to a live full-text search when the index alone is not enough.

pub mod config;
pub mod error;
pub mod extract;
pub mod fs_ops;
pub mod index;
pub mod report;
pub mod search;

pub use config::Config;
pub use error::{Error, Result};
