//! One-shot chart update: fetch recent bars, render them, save the panel frame.
//!
//! ```text
//! epd-ticker --ticker MSFT --output msft.png
//! epd-ticker --from-json saved_aggs.json --as-of 2024-12-03
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use epd_ticker::{
    AlwaysConnected, EpdSurface, JsonFileSource, PolygonClient, Settings, TcpProbe, UpdateRequest,
    run_update,
};

#[derive(Parser)]
#[command(name = "epd-ticker", version = epd_ticker::VERSION, about = epd_ticker::DESCRIPTION)]
struct Cli {
    /// Path to a TOML settings file (default: ./epd-ticker.toml if present)
    #[arg(long, env = "EPD_TICKER_CONFIG")]
    config: Option<PathBuf>,

    /// Ticker symbol, overrides the settings file
    #[arg(long)]
    ticker: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today when computing the request window
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Where to write the PNG snapshot
    #[arg(long)]
    output: Option<PathBuf>,

    /// Render from a saved aggregates response instead of the network
    #[arg(long)]
    from_json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(ticker) = cli.ticker {
        settings.ticker = ticker;
    }
    if let Some(as_of) = cli.as_of {
        settings.as_of = Some(as_of);
    }
    if let Some(output) = cli.output {
        settings.output = output;
    }
    settings.validate().context("validating settings")?;

    let today = settings.as_of.unwrap_or_else(|| Local::now().date_naive());
    let request = UpdateRequest::from_settings(&settings, today);
    info!(ticker = %request.ticker, %today, timespan = %request.timespan, "Starting update");

    let mut surface = EpdSurface::for_layout(&request.layout);

    let plan = match cli.from_json {
        Some(path) => {
            let source = JsonFileSource::new(path);
            run_update(&request, &mut AlwaysConnected, &source, &mut surface).await?
        }
        None => {
            let api_key = settings
                .api_key
                .as_deref()
                .context("api_key is not set (use EPD_TICKER_API_KEY or the settings file)")?;
            let client = PolygonClient::new(&settings.api_base_url, api_key)?;
            let mut probe = TcpProbe::new(settings.probe_addr.clone());
            run_update(&request, &mut probe, &client, &mut surface).await?
        }
    };

    surface
        .save_png(&settings.output)
        .with_context(|| format!("writing {}", settings.output.display()))?;

    println!(
        "{}: {} bars, ${} .. ${} -> {}",
        request.ticker,
        plan.candles.len(),
        plan.range.min_val,
        plan.range.max_val,
        settings.output.display()
    );

    Ok(())
}
