//! The two entry points: `fetch` persists the page, `parse` turns the persisted
//! page into CSV files. They share nothing but the raw document path.

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::extract::{extract_market, extract_news, Alignment, MarketCounts, MarketRow, NewsRow};
use crate::fetch::{persist_document, Fetch};
use crate::output::write_records;
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub url: String,
    pub status: u16,
    pub path: PathBuf,
    pub bytes: usize,
    /// Whether the news marker text appears anywhere in the fetched page
    pub marker_found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub market: Vec<MarketRow>,
    pub market_counts: MarketCounts,
    pub news: Vec<NewsRow>,
    pub market_csv: PathBuf,
    pub news_csv: PathBuf,
}

/// Download the page and persist it verbatim. Nothing is written on failure.
pub fn run_fetch(settings: &Settings, fetcher: &impl Fetch) -> Result<FetchReport> {
    let page = fetcher.fetch(&settings.fetch)?;
    persist_document(&settings.paths.raw_html, &page.body)?;
    info!(
        status = page.status,
        path = %settings.paths.raw_html.display(),
        "Saved raw document"
    );

    let marker_found = Page::parse(&page.body).contains_text(&settings.news.marker);
    info!(marker = %settings.news.marker, found = marker_found, "Checked for news marker");

    Ok(FetchReport {
        url: settings.fetch.url.clone(),
        status: page.status,
        path: settings.paths.raw_html.clone(),
        bytes: page.body.len(),
        marker_found,
    })
}

/// Load the persisted page, extract market cards and news, write both CSVs.
pub fn run_parse(settings: &Settings) -> Result<ParseReport> {
    info!(path = %settings.paths.raw_html.display(), "Reading raw document");
    let page = Page::load(&settings.paths.raw_html)?;

    let alignment = if settings.market.strict {
        Alignment::Strict
    } else {
        Alignment::Truncate
    };
    let market = extract_market(&page, &settings.market, alignment)?;
    info!(rows = market.rows.len(), "Extracted market cards");
    write_records(&settings.paths.market_csv, &market.rows)?;

    let news = extract_news(&page, &settings.news);
    info!(rows = news.len(), "Extracted latest news");
    write_records(&settings.paths.news_csv, &news)?;

    Ok(ParseReport {
        market: market.rows,
        market_counts: market.counts,
        news,
        market_csv: settings.paths.market_csv.clone(),
        news_csv: settings.paths.news_csv.clone(),
    })
}
