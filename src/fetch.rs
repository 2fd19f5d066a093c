//! Aggregate bar retrieval
//!
//! The renderer only ever sees a complete, newest-first `Vec<OhlcBar>`.
//! Anything short of that is a [`RetrievalError`] reported before drawing.

use crate::data::OhlcBar;
use crate::errors::RetrievalError;
use crate::window::{DateWindow, Timespan};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use std::time::Duration;

/// Source of aggregated bars for one ticker
#[allow(async_fn_in_trait)]
pub trait BarSource {
    /// Exactly `capacity` bars, index 0 being the most recent
    async fn fetch_bars(
        &self,
        window: &DateWindow,
        ticker: &str,
        multiplier: u32,
        timespan: Timespan,
        capacity: usize,
    ) -> Result<Vec<OhlcBar>, RetrievalError>;
}

/// Aggregates response body
#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Vec<AggregateBar>,
}

/// One entry of `results`; volume and timestamp are accepted but unused
#[derive(Debug, Deserialize)]
struct AggregateBar {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    #[serde(default)]
    #[allow(dead_code)]
    v: Option<f64>,
    #[serde(default)]
    #[allow(dead_code)]
    t: Option<i64>,
}

impl From<AggregateBar> for OhlcBar {
    fn from(bar: AggregateBar) -> Self {
        OhlcBar::new(bar.o, bar.h, bar.l, bar.c)
    }
}

/// Decode a newest-first aggregates body and enforce the capacity contract.
pub fn parse_aggregates(body: &str, capacity: usize) -> Result<Vec<OhlcBar>, RetrievalError> {
    let response: AggregatesResponse = serde_json::from_str(body)?;

    if response.status.as_deref() == Some("ERROR") {
        return Err(RetrievalError::Decode {
            message: response
                .error
                .unwrap_or_else(|| "server reported an error".to_string()),
        });
    }

    let bars: Vec<OhlcBar> = response.results.into_iter().map(OhlcBar::from).collect();
    take_capacity(bars, capacity)
}

fn take_capacity(mut bars: Vec<OhlcBar>, capacity: usize) -> Result<Vec<OhlcBar>, RetrievalError> {
    if bars.is_empty() {
        return Err(RetrievalError::Empty);
    }
    if bars.len() < capacity {
        return Err(RetrievalError::Incomplete {
            expected: capacity,
            received: bars.len(),
        });
    }
    bars.truncate(capacity);
    Ok(bars)
}

/// Reads a previously saved aggregates response from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BarSource for JsonFileSource {
    async fn fetch_bars(
        &self,
        window: &DateWindow,
        ticker: &str,
        _multiplier: u32,
        _timespan: Timespan,
        capacity: usize,
    ) -> Result<Vec<OhlcBar>, RetrievalError> {
        info!(path = %self.path.display(), ticker, %window, "Loading saved aggregates");
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RetrievalError::Read {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        parse_aggregates(&body, capacity)
    }
}

/// REST client for the aggregates endpoint
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct PolygonClient {
    base_url: String,
    api_key: String,
    client: Client,
}

#[cfg(feature = "fetch")]
impl PolygonClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, RetrievalError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Full request URL. The API key travels in the `Authorization` header.
    pub fn aggregates_path(
        &self,
        window: &DateWindow,
        ticker: &str,
        multiplier: u32,
        timespan: Timespan,
        limit: usize,
    ) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}?adjusted=true&sort=desc&limit={}",
            self.base_url,
            ticker,
            multiplier,
            timespan.as_str(),
            window.start_str(),
            window.end_str(),
            limit
        )
    }
}

#[cfg(feature = "fetch")]
impl BarSource for PolygonClient {
    async fn fetch_bars(
        &self,
        window: &DateWindow,
        ticker: &str,
        multiplier: u32,
        timespan: Timespan,
        capacity: usize,
    ) -> Result<Vec<OhlcBar>, RetrievalError> {
        let path = self.aggregates_path(window, ticker, multiplier, timespan, capacity);
        info!(%path, "Requesting aggregates");

        let response = self
            .client
            .get(&path)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RetrievalError::Status {
                code: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "Aggregates received");
        parse_aggregates(&body, capacity)
    }
}
