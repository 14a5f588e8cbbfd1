//! Sitegauge main entry point
//!
//! Command-line interface for the composite website audit engine.

use clap::Parser;
use sitegauge::audit::Auditor;
use sitegauge::config::{default_config, load_config};
use sitegauge::output::{render_comparison, render_summary, write_findings_csv, write_json_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitegauge: composite multi-signal website audits
///
/// Audits a site's structure, content quality, link profile, and
/// structured data, folds in external performance scores when a key is
/// configured, and compares the result against up to three competitors.
#[derive(Parser, Debug)]
#[command(name = "sitegauge")]
#[command(version)]
#[command(about = "Composite multi-signal website audits", long_about = None)]
struct Cli {
    /// Address of the site to audit (scheme optional)
    #[arg(value_name = "URL")]
    url: String,

    /// Competitor addresses to compare against (at most 3 are analyzed)
    #[arg(long, value_name = "URL", num_args = 1..)]
    competitors: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the crawl page cap
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Write the full report as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write the findings checklist as CSV to this path
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("loading configuration from {}", path.display());
            load_config(path)?
        }
        None => default_config(),
    };
    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
        sitegauge::config::validate(&config)?;
    }

    let auditor = Auditor::new(config)?;

    if cli.competitors.is_empty() {
        let audit = auditor.audit_url(&cli.url).await?;

        println!("{}", render_summary(&audit));

        if let Some(path) = &cli.json {
            write_json_report(path, &audit)?;
        }
        if let Some(path) = &cli.csv {
            write_findings_csv(path, &audit)?;
        }
    } else {
        let report = auditor.compare(&cli.url, &cli.competitors).await?;

        println!("{}", render_comparison(&report));

        if let Some(path) = &cli.json {
            write_json_report(path, &report)?;
        }
        if cli.csv.is_some() {
            tracing::warn!("findings CSV export applies to single-site audits only");
        }
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegauge=info,warn"),
            1 => EnvFilter::new("sitegauge=debug,info"),
            2 => EnvFilter::new("sitegauge=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
