//! Candlestick geometry: body and wick placement in panel pixels
//!
//! Everything here is pure computation. Nothing draws; the renderer replays the
//! geometry onto a [`DrawSurface`](crate::surface::DrawSurface).

use crate::data::{OhlcBar, Price, ValueRange};
use crate::errors::Result;
use crate::layouts::ChartLayout;
use crate::scale::LinearScale;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in panel pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Vertical line starting at `(x, y)` and extending `length` pixels downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalSegment {
    pub x: i32,
    pub y: i32,
    pub length: i32,
}

/// Drawable geometry for one candle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub body: PixelRect,
    pub wick: VerticalSegment,
}

/// Builds candle geometry against one shared price scale.
///
/// Prices map onto `[0, panel_height]` with price growing upwards; the row is
/// then flipped because pixel row 0 is the top of the panel.
#[derive(Debug, Clone, Copy)]
pub struct CandleBuilder {
    scale: LinearScale,
    layout: ChartLayout,
}

impl CandleBuilder {
    /// Fails with `DegenerateRange` when every bar shares one price.
    pub fn new(range: &ValueRange, layout: ChartLayout) -> Result<Self> {
        let scale = LinearScale::new(
            range.min_val.value(),
            range.max_val.value(),
            0.0,
            f64::from(layout.panel_height),
        )?;
        Ok(Self { scale, layout })
    }

    /// Price height above the panel bottom, before truncation to whole pixels
    #[inline]
    pub fn height_of(&self, price: Price) -> f64 {
        self.scale.map(price.value())
    }

    /// Top row for a reference price
    fn row_of(&self, price: Price) -> i32 {
        self.layout
            .panel_height
            .saturating_sub(to_pixels(self.height_of(price)))
    }

    pub fn build(&self, bar: &OhlcBar, body_x: i32, wick_x: i32) -> CandleGeometry {
        let body_length =
            (self.height_of(bar.open_price) - self.height_of(bar.close_price)).abs();
        let wick_length =
            (self.height_of(bar.high_price) - self.height_of(bar.low_price)).abs();

        CandleGeometry {
            body: PixelRect {
                x: body_x,
                y: self.row_of(bar.body_reference()),
                width: self.layout.bar_width,
                height: to_pixels(body_length),
            },
            wick: VerticalSegment {
                x: wick_x,
                y: self.row_of(bar.wick_reference()),
                length: to_pixels(wick_length),
            },
        }
    }
}

/// Zero-length candle used when the value range is degenerate.
///
/// Anchored at the vertical middle of the panel so flat data stays visible.
pub fn flat_candle(layout: &ChartLayout, body_x: i32, wick_x: i32) -> CandleGeometry {
    let mid = layout.panel_height / 2;
    CandleGeometry {
        body: PixelRect {
            x: body_x,
            y: mid,
            width: layout.bar_width,
            height: 0,
        },
        wick: VerticalSegment {
            x: wick_x,
            y: mid,
            length: 0,
        },
    }
}

/// Truncates toward zero. Saturates on overflow and maps NaN to 0.
#[inline]
fn to_pixels(value: f64) -> i32 {
    value as i32
}
