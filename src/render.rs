//! Drives a [`DrawSurface`] through a full chart update
//!
//! Stages, each ending in one commit:
//! 1. clear the panel
//! 2. candle bodies and wicks
//! 3. "Highest"/"Lowest" annotations
//! 4. ticker symbol
//! 5. timespan unit

use crate::data::OhlcBar;
use crate::errors::Result;
use crate::layouts::{ChartLayout, ChartPlan, plan_chart};
use crate::styles::{Color, TextStyle};
use crate::surface::DrawSurface;
use crate::window::Timespan;
use tracing::info;

/// A text label at a fixed panel position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Walk the bars and draw every candle. Does not commit.
pub fn render_chart<S: DrawSurface>(
    surface: &mut S,
    bars: &[OhlcBar],
    layout: &ChartLayout,
) -> Result<ChartPlan> {
    let plan = plan_chart(bars, layout);

    for candle in &plan.candles {
        let body = candle.geometry.body;
        let wick = candle.geometry.wick;
        surface.draw_rect(body.x, body.y, body.width, body.height, Color::INK)?;
        surface.draw_vline(wick.x, wick.y, wick.length, Color::INK)?;
    }

    Ok(plan)
}

/// Extreme-value labels, anchored just right of the last candle
pub fn annotation_labels(plan: &ChartPlan, layout: &ChartLayout) -> [Label; 2] {
    let x = plan.cursor.body_x;
    [
        Label {
            x,
            y: layout.high_label_y,
            text: format!("Highest: ${}", plan.range.max_val),
        },
        Label {
            x,
            y: layout.low_label_y,
            text: format!("Lowest : ${}", plan.range.min_val),
        },
    ]
}

/// Print the annotation labels. Does not commit.
pub fn render_annotations<S: DrawSurface>(
    surface: &mut S,
    plan: &ChartPlan,
    layout: &ChartLayout,
) -> Result<()> {
    apply_text_style(surface, TextStyle::LABEL)?;
    for label in annotation_labels(plan, layout) {
        surface.set_cursor(label.x, label.y)?;
        surface.print(&label.text)?;
    }
    Ok(())
}

/// Print the ticker symbol in the large bold face. Does not commit.
pub fn render_ticker<S: DrawSurface>(
    surface: &mut S,
    ticker: &str,
    layout: &ChartLayout,
) -> Result<()> {
    apply_text_style(surface, TextStyle::TICKER)?;
    let (x, y) = layout.ticker_anchor;
    surface.set_cursor(x, y)?;
    surface.print(ticker)
}

/// Print the timespan unit in the small default face. Does not commit.
pub fn render_unit<S: DrawSurface>(
    surface: &mut S,
    timespan: Timespan,
    layout: &ChartLayout,
) -> Result<()> {
    apply_text_style(surface, TextStyle::LABEL)?;
    let (x, y) = layout.unit_anchor;
    surface.set_cursor(x, y)?;
    surface.print(timespan.as_str())
}

fn apply_text_style<S: DrawSurface>(surface: &mut S, style: TextStyle) -> Result<()> {
    surface.set_font(style.font)?;
    surface.set_text_scale(style.scale)
}

/// Full five-commit update of the panel.
///
/// `bars` must be the complete retrieved sequence, newest first. A surface
/// error aborts the update at the failing stage.
pub fn render_update<S: DrawSurface>(
    surface: &mut S,
    bars: &[OhlcBar],
    ticker: &str,
    timespan: Timespan,
    layout: &ChartLayout,
) -> Result<ChartPlan> {
    surface.clear(Color::PAPER)?;
    surface.commit()?;

    let plan = render_chart(surface, bars, layout)?;
    surface.commit()?;
    info!(
        bars = plan.candles.len(),
        min = plan.range.min_val.value(),
        max = plan.range.max_val.value(),
        degenerate = plan.degenerate,
        "Chart drawn"
    );

    render_annotations(surface, &plan, layout)?;
    surface.commit()?;

    render_ticker(surface, ticker, layout)?;
    surface.commit()?;

    render_unit(surface, timespan, layout)?;
    surface.commit()?;

    Ok(plan)
}
