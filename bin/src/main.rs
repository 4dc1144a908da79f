//! tickfeed CLI - retrieve and decode getprices price feeds.

use anyhow::{Context, Result, bail};
use chrono::TimeDelta;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tickfeed_lib::prelude::*;
use tracing_subscriber::EnvFilter;

mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "tickfeed")]
#[command(about = "Retrieve and decode historical price data", long_about = None)]
#[command(version)]
struct Cli {
    /// Exchange code (e.g., NYSE, NASDAQ, TYO)
    market: String,

    /// Instrument code (e.g., IBM, 7203)
    code: String,

    /// Period of tick in seconds
    #[arg(short, long, default_value_t = 86_400)]
    tick: i64,

    /// Period of data, like 1Y, 2M, 3d, 6h or 30m
    #[arg(short, long, default_value = "1M")]
    period: Period,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Output file path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.tick <= 0 {
        bail!("Tick must be a positive number of seconds, got {}", cli.tick);
    }
    let tick = TimeDelta::try_seconds(cli.tick)
        .with_context(|| format!("Tick out of range: {}", cli.tick))?;

    let config = ClientConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..Default::default()
    };
    let client = PriceClient::new(config).context("Failed to create HTTP client")?;

    let query = PriceQuery::new(cli.market, cli.code)
        .with_tick(tick)
        .with_period(cli.period);

    let (metadata, table) = client
        .get_prices(&query)
        .await
        .with_context(|| format!("Failed to get prices for {}:{}", query.market, query.code))?;

    tracing::info!(rows = table.len(), "decoded price table");
    display::write_output(&metadata, &table, cli.format, cli.output.as_ref())
}
