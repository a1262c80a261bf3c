//! Output formatting module for CLI display
//!
//! Keeps terminal presentation separate from the extraction pipeline.

use colored::Colorize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};
use tickertape::extract::{MarketRow, NewsRow};
use tickertape::pipeline::{FetchReport, ParseReport};

const PREVIEW_ROWS: usize = 10;

/// Format any serializable report for `--json` output
pub fn format_json<T: serde::Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

pub fn format_fetch_report(report: &FetchReport) -> String {
    let mut output = format!(
        "{} HTTP status code: {}\n{} Saved HTML to: {} ({} bytes)\n",
        "✓".green().bold(),
        report.status,
        "✓".green().bold(),
        report.path.display(),
        report.bytes
    );
    let marker = if report.marker_found {
        "yes".green()
    } else {
        "no".yellow()
    };
    output.push_str(&format!(
        "{} Found 'Latest News' text?: {}\n",
        "ℹ".blue().bold(),
        marker
    ));
    output
}

pub fn format_parse_report(report: &ParseReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} Market rows found: {}\n",
        "✓".green().bold(),
        report.market.len()
    ));
    let counts = &report.market_counts;
    if counts.dropped() > 0 {
        output.push_str(&format!(
            "{} Card lists differ ({} symbols, {} positions, {} changes); {} unpaired entries dropped\n",
            "⚠".yellow().bold(),
            counts.symbols,
            counts.positions,
            counts.changes,
            counts.dropped()
        ));
    }
    if !report.market.is_empty() {
        output.push_str(&market_table(&report.market));
        output.push('\n');
    }
    output.push_str(&format!(
        "{} Market CSV created: {}\n",
        "✓".green().bold(),
        report.market_csv.display()
    ));

    output.push_str(&format!(
        "\n{} News rows found: {}\n",
        "✓".green().bold(),
        report.news.len()
    ));
    if !report.news.is_empty() {
        output.push_str(&news_table(&report.news));
        output.push('\n');
    }
    output.push_str(&format!(
        "{} News CSV created: {}\n",
        "✓".green().bold(),
        report.news_csv.display()
    ));

    output
}

fn market_table(rows: &[MarketRow]) -> String {
    #[derive(Tabled)]
    struct MarketPreview {
        #[tabled(rename = "Symbol")]
        symbol: String,
        #[tabled(rename = "Position")]
        position: String,
        #[tabled(rename = "Change")]
        change: String,
    }

    let preview: Vec<MarketPreview> = rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| MarketPreview {
            symbol: row.symbol.clone(),
            position: row.position.clone(),
            change: if row.change_pct.starts_with('-') {
                row.change_pct.red().to_string()
            } else {
                row.change_pct.green().to_string()
            },
        })
        .collect();

    let mut table = Table::new(&preview);
    table.with(Style::rounded());
    table.modify(Columns::new(1..), Alignment::right());
    with_remainder(table.to_string(), rows.len())
}

fn news_table(rows: &[NewsRow]) -> String {
    #[derive(Tabled)]
    struct NewsPreview {
        #[tabled(rename = "Time")]
        timestamp: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Link")]
        link: String,
    }

    let preview: Vec<NewsPreview> = rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| NewsPreview {
            timestamp: row.timestamp.clone(),
            title: row.title.clone(),
            link: row.link.clone(),
        })
        .collect();

    let table = Table::new(&preview).with(Style::rounded()).to_string();
    with_remainder(table, rows.len())
}

fn with_remainder(mut table: String, total: usize) -> String {
    if total > PREVIEW_ROWS {
        table.push_str(&format!("\n... and {} more rows", total - PREVIEW_ROWS));
    }
    table
}
