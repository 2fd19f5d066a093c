//! # EPD Ticker
//!
//! Candlestick charts of recent aggregate bars for a 296x128 monochrome e-paper panel.
//!
//! ## Quick Start
//!
//! ```rust
//! use epd_ticker::{ChartLayout, OhlcBar, RecordingSurface, Timespan, render_update};
//!
//! // Newest bar first, the way the aggregates endpoint returns them
//! let bars = vec![
//!     OhlcBar::new(150.0, 155.0, 148.0, 152.0),
//!     OhlcBar::new(152.0, 160.0, 151.0, 158.0),
//! ];
//!
//! let mut surface = RecordingSurface::new();
//! let layout = ChartLayout::EPD_2IN9;
//! let plan = render_update(&mut surface, &bars, "AAPL", Timespan::Day, &layout).unwrap();
//!
//! assert_eq!(plan.candles.len(), 2);
//! assert_eq!(surface.commit_count(), 5);
//! ```
//!
//! ## Layout
//!
//! Candles are drawn oldest first from the left edge, each `bar_width` wide
//! with a `bar_gap` spacer. Prices map linearly onto panel rows with the
//! window maximum at the top and the minimum at the bottom. The
//! "Highest"/"Lowest" labels sit immediately right of the last candle.
//!
//! ## Features
//!
//! - **fetch**: REST aggregates client and TCP connectivity probe (reqwest, tokio)
//! - **png-export**: PNG snapshots of the rendered frame (image)

pub mod config;
pub mod data;
pub mod elements;
pub mod epd;
pub mod errors;
pub mod fetch;
pub mod layouts;
pub mod network;
pub mod pipeline;
pub mod render;
pub mod scale;
pub mod styles;
pub mod surface;
pub mod window;

// Re-export commonly used types for convenience
pub use config::Settings;
pub use data::{OhlcBar, Price, ValueRange};
pub use elements::{CandleBuilder, CandleGeometry, PixelRect, VerticalSegment};
pub use epd::{EpdSurface, Framebuffer};
pub use errors::{ChartError, Result, RetrievalError};
pub use fetch::{BarSource, JsonFileSource, parse_aggregates};
pub use layouts::{ChartLayout, ChartPlan, Cursor, PlacedCandle, plan_chart};
pub use network::{AlwaysConnected, Connectivity};
pub use pipeline::{UpdateRequest, run_update};
pub use render::{Label, annotation_labels, render_chart, render_update};
pub use scale::{LinearScale, scale};
pub use styles::{Color, FontId, TextStyle};
pub use surface::{DrawOp, DrawSurface, PrintedText, RecordingSurface};
pub use window::{DateWindow, Timespan, compute_window};

#[cfg(feature = "fetch")]
pub use fetch::PolygonClient;
#[cfg(feature = "fetch")]
pub use network::TcpProbe;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
