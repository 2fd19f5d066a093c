//! Runtime settings: defaults, optional TOML file, then `EPD_TICKER_*` env vars

use crate::errors::{ChartError, Result};
use crate::layouts::ChartLayout;
use crate::window::Timespan;
use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default config file stem, looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "epd-ticker";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EPD_TICKER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Ticker symbol to chart
    pub ticker: String,
    /// Number of timespans aggregated into one bar
    pub multiplier: u32,
    pub timespan: Timespan,
    /// How many timespans the request window reaches back
    pub window_count: u32,
    /// Bars drawn per chart; a shorter response is a retrieval failure
    pub bar_capacity: usize,
    pub connect_timeout_ms: u64,
    /// `host:port` probed to decide whether the network is up
    pub probe_addr: String,
    pub api_base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Fixed "today" for reproducible windows
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// PNG snapshot of the final frame
    pub output: PathBuf,
}

impl Settings {
    /// Load settings from `path`, or from `epd-ticker.toml` when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("ticker", "AAPL")?
            .set_default("multiplier", 1_i64)?
            .set_default("timespan", "day")?
            .set_default("window_count", 30_i64)?
            .set_default("bar_capacity", 15_i64)?
            .set_default("connect_timeout_ms", 30_000_i64)?
            .set_default("probe_addr", "api.polygon.io:443")?
            .set_default("api_base_url", "https://api.polygon.io")?
            .set_default("output", "chart.png")?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(config_error("ticker must not be empty"));
        }
        if self.multiplier == 0 {
            return Err(config_error("multiplier must be at least 1"));
        }
        if self.window_count == 0 {
            return Err(config_error("window_count must be at least 1"));
        }
        if self.bar_capacity == 0 {
            return Err(config_error("bar_capacity must be at least 1"));
        }

        let fits = ChartLayout::EPD_2IN9.capacity();
        if self.bar_capacity > fits {
            warn!(
                bar_capacity = self.bar_capacity,
                fits, "More bars than fit on the panel; the rightmost will be clipped"
            );
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn config_error(message: &str) -> ChartError {
    ChartError::Config {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(table: toml::Table) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml::to_string(&table).unwrap().as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut table = toml::Table::new();
        table.insert("ticker".into(), "MSFT".into());
        table.insert("timespan".into(), "week".into());
        table.insert("bar_capacity".into(), 10_i64.into());
        table.insert("as_of".into(), "2024-12-03".into());
        table.insert("api_key".into(), "k-123".into());
        let file = write_config(table);

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.ticker, "MSFT");
        assert_eq!(settings.timespan, Timespan::Week);
        assert_eq!(settings.bar_capacity, 10);
        assert_eq!(settings.as_of, NaiveDate::from_ymd_opt(2024, 12, 3));
        assert_eq!(settings.api_key.as_deref(), Some("k-123"));

        // untouched defaults
        assert_eq!(settings.multiplier, 1);
        assert_eq!(settings.window_count, 30);
        assert_eq!(settings.connect_timeout(), Duration::from_secs(30));
        assert_eq!(settings.output, PathBuf::from("chart.png"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut table = toml::Table::new();
        table.insert("bar_capacity".into(), 0_i64.into());
        let file = write_config(table);

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ChartError::Config { .. }));
    }

    #[test]
    fn test_unknown_timespan_rejected() {
        let mut table = toml::Table::new();
        table.insert("timespan".into(), "fortnight".into());
        let file = write_config(table);

        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/epd-ticker.toml"))).unwrap_err();
        assert!(matches!(err, ChartError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_blank_ticker() {
        let mut table = toml::Table::new();
        table.insert("ticker".into(), "  ".into());
        let file = write_config(table);

        assert!(Settings::load(Some(file.path())).is_err());
    }
}
