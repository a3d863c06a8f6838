//! # eu-vat-rates-update
//!
//! Fetches current rates from the European Commission TEDB service and
//! rewrites the dataset file when anything changed.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use eu_vat_rates::tedb::{
    TEDB_ENDPOINT, TedbConfig, build_dataset, compute_diff, fetch_rates, read_previous,
    write_dataset,
};

/// Update EU VAT rates from the European Commission TEDB SOAP service.
#[derive(Parser, Debug)]
#[command(name = "eu-vat-rates-update", version, about)]
struct Cli {
    /// Show the diff without writing the file.
    #[arg(long)]
    dry_run: bool,

    /// Dataset file to compare against and rewrite.
    #[arg(long, default_value = "data/eu-vat-rates.json")]
    data_file: PathBuf,

    /// TEDB SOAP endpoint.
    #[arg(long, default_value = TEDB_ENDPOINT)]
    endpoint: String,

    /// Date the rates must be valid on (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = TedbConfig {
        endpoint: cli.endpoint,
        timeout: Duration::from_secs(cli.timeout),
        ..TedbConfig::default()
    };
    if let Some(date) = cli.date {
        config.situation_on = date;
    }

    let upstream = fetch_rates(&config).await.with_context(|| {
        format!(
            "EC TEDB SOAP service is unavailable, check connectivity and retry (endpoint: {})",
            config.endpoint
        )
    })?;

    let version = config.situation_on.format("%Y-%m-%d").to_string();
    let fresh = build_dataset(&upstream, &version, config.situation_on)?;

    let previous = read_previous(&cli.data_file);
    let changes = compute_diff(&previous, &serde_json::to_value(&fresh)?);

    if changes.is_empty() {
        let published = previous
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or("n/a");
        println!("No changes detected (version: {published}).");
        return Ok(());
    }

    println!("Changes ({} fields):", changes.len());
    for change in &changes {
        println!("{change}");
    }

    if cli.dry_run {
        println!("\n[dry-run] File not updated.");
        return Ok(());
    }

    write_dataset(&cli.data_file, &fresh)?;
    println!(
        "\nUpdated: {}  (version: {})",
        cli.data_file.display(),
        fresh.version
    );
    Ok(())
}
