//! Price bar data and the value-range reduction used for chart scaling

use serde::{Deserialize, Serialize};
use std::fmt;

/// A price in quote currency.
///
/// Kept distinct from pixel quantities so the two unit systems never mix silently.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub f64);

impl Price {
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    /// Two decimal places, matching how the panel prints currency.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// One aggregated trading period.
///
/// Well-formed bars satisfy `low <= open, close <= high`. This is not
/// enforced; malformed bars render incorrectly but never panic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub open_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    pub close_price: Price,
}

impl OhlcBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open_price: Price(open),
            high_price: Price(high),
            low_price: Price(low),
            close_price: Price(close),
        }
    }

    /// Check if this is a bullish (up) bar
    pub fn is_bullish(&self) -> bool {
        self.close_price > self.open_price
    }

    /// Upper edge of the body: the higher of open and close.
    pub fn body_reference(&self) -> Price {
        if self.close_price > self.open_price {
            self.close_price
        } else {
            self.open_price
        }
    }

    /// Upper end of the wick. Falls back to `low` when the bar is malformed (`low > high`).
    pub fn wick_reference(&self) -> Price {
        if self.high_price > self.low_price {
            self.high_price
        } else {
            self.low_price
        }
    }
}

/// Global extremes across a bar sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min_val: Price,
    pub max_val: Price,
}

impl ValueRange {
    /// Single pass over `bars`: minimum of every low and maximum of every high.
    ///
    /// Callers must pass at least one bar. An empty slice yields an inverted
    /// infinite range, which the scale mapper rejects as degenerate.
    pub fn from_bars(bars: &[OhlcBar]) -> Self {
        let (min_val, max_val) = bars.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min_val, max_val), bar| {
                (
                    min_val.min(bar.low_price.value()),
                    max_val.max(bar.high_price.value()),
                )
            },
        );

        Self {
            min_val: Price(min_val),
            max_val: Price(max_val),
        }
    }

    /// Width of the range in currency units
    pub fn span(&self) -> f64 {
        self.max_val.value() - self.min_val.value()
    }
}
