//! Runtime settings for the fetch and parse pipelines.
//!
//! Every value has a built-in default matching the CNBC world page; a TOML
//! file passed with `--config` can override any subset of them.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_URL: &str = "https://www.cnbc.com/world/?region=world";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.cnbc.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub paths: PathSettings,
    pub market: MarketSettings,
    pub news: NewsSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub url: String,
    pub timeout_secs: u64,
    pub headers: BTreeMap<String, String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Raw markup written by `fetch` and read by `parse`
    pub raw_html: PathBuf,
    pub market_csv: PathBuf,
    pub news_csv: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_html: PathBuf::from("data/raw_data/web_data.html"),
            market_csv: PathBuf::from("data/processed_data/market_data.csv"),
            news_csv: PathBuf::from("data/processed_data/news_data.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub symbol_class: String,
    pub position_class: String,
    pub change_class: String,
    /// Reject mismatched card counts instead of truncating to the shortest list
    pub strict: bool,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            symbol_class: "marketCard_symbol".to_string(),
            position_class: "marketCard_stockPosition".to_string(),
            change_class: "marketCard-changePct".to_string(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    pub marker: String,
    /// How many ancestors above the marker text bound the news container
    pub container_depth: usize,
    pub min_title_chars: usize,
    pub site_origin: String,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            marker: "Latest News".to_string(),
            container_depth: 6,
            min_title_chars: 10,
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
