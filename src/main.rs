mod cli;

use clap::Parser;
use cli::{formatters, Cli, Commands};
use tickertape::config::Settings;
use tickertape::error::Result;
use tickertape::fetch::HttpFetcher;
use tickertape::pipeline;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so `--json` output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch => {
            let report = pipeline::run_fetch(&settings, &HttpFetcher::new())?;
            if cli.json {
                println!("{}", formatters::format_json(&report));
            } else {
                print!("{}", formatters::format_fetch_report(&report));
            }
        }
        Commands::Parse { strict } => {
            settings.market.strict |= strict;
            let report = pipeline::run_parse(&settings)?;
            if cli.json {
                println!("{}", formatters::format_json(&report));
            } else {
                print!("{}", formatters::format_parse_report(&report));
            }
        }
    }

    Ok(())
}
