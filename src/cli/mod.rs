use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "tickertape")]
#[command(
    version,
    about = "Scrape CNBC market cards and latest news into CSV"
)]
#[command(
    long_about = "Fetch the CNBC world page to disk, then extract the market banner cards and the Latest News rail into two CSV files. Run `fetch` before `parse`."
)]
pub struct Cli {
    /// TOML file overriding the built-in URL, paths and heuristics
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the page and save the raw HTML
    Fetch,

    /// Extract market and news rows from the saved HTML into CSV files
    Parse {
        /// Fail when the market card lists differ in length instead of truncating
        #[arg(long)]
        strict: bool,
    },
}
