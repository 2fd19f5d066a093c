//! One-shot update: connect, compute the window, fetch, then render
//!
//! Retrieval problems surface here before the surface is touched, so a
//! failed fetch never leaves a partial chart on the panel.

use crate::config::Settings;
use crate::errors::{Result, RetrievalError};
use crate::fetch::BarSource;
use crate::layouts::{ChartLayout, ChartPlan};
use crate::network::Connectivity;
use crate::render::render_update;
use crate::surface::DrawSurface;
use crate::window::{Timespan, compute_window};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{error, info};

/// Everything a single update needs, independent of where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub ticker: String,
    pub multiplier: u32,
    pub timespan: Timespan,
    pub window_count: u32,
    pub bar_capacity: usize,
    pub connect_timeout: Duration,
    pub today: NaiveDate,
    pub layout: ChartLayout,
}

impl UpdateRequest {
    pub fn from_settings(settings: &Settings, today: NaiveDate) -> Self {
        Self {
            ticker: settings.ticker.clone(),
            multiplier: settings.multiplier,
            timespan: settings.timespan,
            window_count: settings.window_count,
            bar_capacity: settings.bar_capacity,
            connect_timeout: settings.connect_timeout(),
            today,
            layout: ChartLayout::EPD_2IN9,
        }
    }
}

pub async fn run_update<C, B, S>(
    request: &UpdateRequest,
    connectivity: &mut C,
    source: &B,
    surface: &mut S,
) -> Result<ChartPlan>
where
    C: Connectivity,
    B: BarSource,
    S: DrawSurface,
{
    if !connectivity.connect(request.connect_timeout).await {
        error!(timeout = ?request.connect_timeout, "Network unavailable, skipping update");
        return Err(RetrievalError::NotConnected.into());
    }

    let window = compute_window(request.today, request.timespan, request.window_count);
    info!(start = %window.start_str(), end = %window.end_str(), "Request window");

    let bars = source
        .fetch_bars(
            &window,
            &request.ticker,
            request.multiplier,
            request.timespan,
            request.bar_capacity,
        )
        .await
        .inspect_err(|e| error!(error = %e, ticker = %request.ticker, "Bar retrieval failed"))?;
    info!(ticker = %request.ticker, bars = bars.len(), "Query done");

    render_update(
        surface,
        &bars,
        &request.ticker,
        request.timespan,
        &request.layout,
    )
}
