//! Monochrome colors and font faces for the e-paper panel

use serde::{Deserialize, Serialize};

/// Ink color on a black/white panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Color used for candles and text
    pub const INK: Color = Color::Black;
    /// Color of a cleared panel
    pub const PAPER: Color = Color::White;
}

/// Font family selection.
///
/// `Default` is anchored at the top-left of the text cell. `SansBold` is
/// anchored on the baseline, so its cursor row is where the glyphs sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontId {
    #[default]
    Default,
    SansBold,
}

/// Text settings applied to a single label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: FontId,
    pub scale: u8,
}

impl TextStyle {
    /// Small default face used for annotations and the unit label
    pub const LABEL: TextStyle = TextStyle {
        font: FontId::Default,
        scale: 1,
    };

    /// Large bold face used for the ticker symbol
    pub const TICKER: TextStyle = TextStyle {
        font: FontId::SansBold,
        scale: 2,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(Color::INK, Color::Black);
        assert_eq!(Color::PAPER, Color::White);
        assert_eq!(FontId::default(), FontId::Default);
        assert_eq!(TextStyle::TICKER.scale, 2);
        assert_eq!(TextStyle::LABEL.font, FontId::Default);
    }
}
