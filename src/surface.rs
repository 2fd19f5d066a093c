//! Drawing surface capability and a recording implementation for replay tests

use crate::errors::{ChartError, Result};
use crate::styles::{Color, FontId};
use serde::{Deserialize, Serialize};

/// Pixel primitives exposed by a panel driver.
///
/// Coordinates are panel pixels with the origin at the top-left. Nothing is
/// observable on the panel until [`commit`](DrawSurface::commit). Access is
/// sequential; a failing call aborts the render.
pub trait DrawSurface {
    /// Outline a `width` x `height` rectangle with its top-left corner at `(x, y)`
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) -> Result<()>;

    /// Vertical line of `length` pixels going down from `(x, y)`
    fn draw_vline(&mut self, x: i32, y: i32, length: i32, color: Color) -> Result<()>;

    fn set_cursor(&mut self, x: i32, y: i32) -> Result<()>;

    fn set_font(&mut self, font: FontId) -> Result<()>;

    fn set_text_scale(&mut self, scale: u8) -> Result<()>;

    /// Draw `text` at the cursor and advance the cursor past it
    fn print(&mut self, text: &str) -> Result<()>;

    fn clear(&mut self, color: Color) -> Result<()>;

    /// Push the current frame to the panel
    fn commit(&mut self) -> Result<()>;
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOp {
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
    VLine {
        x: i32,
        y: i32,
        length: i32,
        color: Color,
    },
    SetCursor {
        x: i32,
        y: i32,
    },
    SetFont(FontId),
    SetTextScale(u8),
    Print(String),
    Clear(Color),
    Commit,
}

/// Text drawn by a `Print`, resolved against the cursor and font in effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedText {
    pub x: i32,
    pub y: i32,
    pub font: FontId,
    pub scale: u8,
    pub text: String,
}

/// Records every call instead of drawing.
///
/// Used for deterministic replay of chart geometry without a panel. Can be
/// told to fail on the n-th commit to simulate a hardware fault.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    fail_on_commit: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` commit (1-based) with a surface error
    pub fn failing_on_commit(nth: usize) -> Self {
        Self {
            ops: Vec::new(),
            fail_on_commit: Some(nth),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn commit_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Commit)).count()
    }

    pub fn rects(&self) -> Vec<(i32, i32, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => Some((x, y, width, height)),
                _ => None,
            })
            .collect()
    }

    pub fn vlines(&self) -> Vec<(i32, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::VLine { x, y, length, .. } => Some((x, y, length)),
                _ => None,
            })
            .collect()
    }

    /// Replay text state to recover where each string was printed.
    ///
    /// The cursor is not advanced by `Print` since nothing is measured here.
    pub fn printed(&self) -> Vec<PrintedText> {
        let (mut x, mut y) = (0, 0);
        let mut font = FontId::Default;
        let mut scale = 1;
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                DrawOp::SetCursor { x: cx, y: cy } => (x, y) = (*cx, *cy),
                DrawOp::SetFont(f) => font = *f,
                DrawOp::SetTextScale(s) => scale = *s,
                DrawOp::Print(text) => out.push(PrintedText {
                    x,
                    y,
                    font,
                    scale,
                    text: text.clone(),
                }),
                _ => {}
            }
        }
        out
    }

    /// Operations between the (n-1)-th and n-th commit, excluding the commit
    pub fn stage(&self, n: usize) -> &[DrawOp] {
        let mut start = 0;
        let mut seen = 0;
        for (i, op) in self.ops.iter().enumerate() {
            if matches!(op, DrawOp::Commit) {
                seen += 1;
                if seen == n {
                    return &self.ops[start..i];
                }
                start = i + 1;
            }
        }
        &[]
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn draw_vline(&mut self, x: i32, y: i32, length: i32, color: Color) -> Result<()> {
        self.ops.push(DrawOp::VLine {
            x,
            y,
            length,
            color,
        });
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.ops.push(DrawOp::SetCursor { x, y });
        Ok(())
    }

    fn set_font(&mut self, font: FontId) -> Result<()> {
        self.ops.push(DrawOp::SetFont(font));
        Ok(())
    }

    fn set_text_scale(&mut self, scale: u8) -> Result<()> {
        self.ops.push(DrawOp::SetTextScale(scale));
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.ops.push(DrawOp::Print(text.to_string()));
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Clear(color));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.fail_on_commit == Some(self.commit_count() + 1) {
            return Err(ChartError::Surface {
                message: "simulated panel fault on commit".to_string(),
            });
        }
        self.ops.push(DrawOp::Commit);
        Ok(())
    }
}
