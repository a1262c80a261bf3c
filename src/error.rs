//! Error handling for tickertape
//!
//! Defines the domain error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use std::path::PathBuf;

use thiserror::Error;

/// Core error types for the fetch and extraction pipelines
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Missing file: {}. Run `tickertape fetch` first.", path.display())]
    MissingInput { path: PathBuf },

    #[error("request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("invalid class name `{class}`: must be non-empty without whitespace")]
    InvalidClassName { class: String },

    #[error(
        "market cards are misaligned: {symbols} symbols, {positions} positions, {changes} changes"
    )]
    MisalignedMarketCards {
        symbols: usize,
        positions: usize,
        changes: usize,
    },
}

/// Result type alias for pipeline operations
pub type Result<T> = anyhow::Result<T>;
