//! Fixed panel layout and the left-to-right chart walk

use crate::data::{OhlcBar, ValueRange};
use crate::elements::{CandleBuilder, CandleGeometry, flat_candle};
use crate::errors::ChartError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Horizontal offset of the wick from the left edge of its body.
///
/// Not derived from `bar_width`: with an 11px body it lands on the centre
/// column. Revisit if the bar width changes.
pub const WICK_OFFSET: i32 = 5;

/// Compile-time chart bounds for a panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Panel width in landscape orientation
    pub panel_width: i32,
    /// Panel height; prices are scaled onto `[0, panel_height]`
    pub panel_height: i32,
    /// Candle body width
    pub bar_width: i32,
    /// Gap between consecutive candles
    pub bar_gap: i32,
    /// Column of the first (oldest) body
    pub body_origin_x: i32,
    /// Wick column relative to its body
    pub wick_offset: i32,
    /// Row of the "Highest" annotation
    pub high_label_y: i32,
    /// Row of the "Lowest" annotation
    pub low_label_y: i32,
    /// Ticker label anchor (baseline font)
    pub ticker_anchor: (i32, i32),
    /// Timespan unit label anchor
    pub unit_anchor: (i32, i32),
}

impl ChartLayout {
    /// MH-ET Live 2.9" panel, 296 x 128 in landscape
    pub const EPD_2IN9: ChartLayout = ChartLayout {
        panel_width: 296,
        panel_height: 128,
        bar_width: 11,
        bar_gap: 1,
        body_origin_x: 0,
        wick_offset: WICK_OFFSET,
        high_label_y: 0,
        low_label_y: 120,
        ticker_anchor: (180, 50),
        unit_anchor: (180, 55),
    };

    /// Horizontal advance from one candle to the next
    pub const fn bar_pitch(&self) -> i32 {
        self.bar_width + self.bar_gap
    }

    /// Number of candles that fit before the right edge of the panel
    pub fn capacity(&self) -> usize {
        let usable = self.panel_width - self.body_origin_x;
        if usable <= 0 || self.bar_pitch() <= 0 {
            return 0;
        }
        (usable / self.bar_pitch()) as usize
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::EPD_2IN9
    }
}

/// Body and wick columns threaded through the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub body_x: i32,
    pub wick_x: i32,
}

impl Cursor {
    pub fn start(layout: &ChartLayout) -> Self {
        Self {
            body_x: layout.body_origin_x,
            wick_x: layout.body_origin_x + layout.wick_offset,
        }
    }

    fn advance(&mut self, pitch: i32) {
        self.body_x = self.body_x.saturating_add(pitch);
        self.wick_x = self.wick_x.saturating_add(pitch);
    }
}

/// A candle together with the bar index it came from (0 = most recent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedCandle {
    pub index: usize,
    pub bar: OhlcBar,
    pub geometry: CandleGeometry,
}

/// Deterministic result of walking a bar sequence, in drawing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlan {
    pub range: ValueRange,
    /// True when flat geometry was substituted for a degenerate range
    pub degenerate: bool,
    /// Oldest bar first, i.e. leftmost first
    pub candles: Vec<PlacedCandle>,
    /// Cursor after the last candle; annotations anchor here
    pub cursor: Cursor,
}

/// Walk `bars` from the oldest (last index) to the newest (index 0).
///
/// A degenerate value range never aborts the walk: every bar gets zero-length
/// geometry instead.
pub fn plan_chart(bars: &[OhlcBar], layout: &ChartLayout) -> ChartPlan {
    let range = ValueRange::from_bars(bars);

    let builder = match CandleBuilder::new(&range, *layout) {
        Ok(builder) => Some(builder),
        Err(ChartError::DegenerateRange { min, max }) => {
            warn!(min, max, "Degenerate value range, drawing flat candles");
            None
        }
        Err(e) => {
            warn!(error = %e, "Scale construction failed, drawing flat candles");
            None
        }
    };

    let mut cursor = Cursor::start(layout);
    let mut candles = Vec::with_capacity(bars.len());

    for (index, bar) in bars.iter().enumerate().rev() {
        let geometry = match &builder {
            Some(builder) => builder.build(bar, cursor.body_x, cursor.wick_x),
            None => flat_candle(layout, cursor.body_x, cursor.wick_x),
        };

        debug!(
            index,
            body_x = geometry.body.x,
            body_y = geometry.body.y,
            body_h = geometry.body.height,
            wick_x = geometry.wick.x,
            wick_y = geometry.wick.y,
            wick_len = geometry.wick.length,
            "Placed candle"
        );

        candles.push(PlacedCandle {
            index,
            bar: *bar,
            geometry,
        });
        cursor.advance(layout.bar_pitch());
    }

    ChartPlan {
        range,
        degenerate: builder.is_none(),
        candles,
        cursor,
    }
}
