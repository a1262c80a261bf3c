//! Tickertape - CNBC market banner and latest news scraper
//!
//! This library fetches the CNBC world page, persists the raw markup, and
//! extracts market cards and "Latest News" items into CSV files.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod page;
pub mod pipeline;
