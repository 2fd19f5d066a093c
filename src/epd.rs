//! In-memory framebuffer surface for a monochrome e-paper panel
//!
//! Mirrors what the panel driver would show: outlined rectangles, one-pixel
//! lines and mono-font text on a black/white frame. Committed frames can be
//! snapshotted to PNG for previewing on a host.

use crate::errors::Result;
use crate::layouts::ChartLayout;
use crate::styles::{Color, FontId};
use crate::surface::DrawSurface;
use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyleBuilder,
        ascii::{FONT_6X10, FONT_7X13_BOLD, FONT_9X18_BOLD, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};
use std::convert::Infallible;
use tracing::debug;

#[cfg(feature = "png-export")]
use std::path::Path;

/// One bit per pixel, row-major. `BinaryColor::On` is ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    size: Size,
    pixels: Vec<BinaryColor>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![BinaryColor::Off; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((y as usize) * (self.size.width as usize) + x as usize)
    }

    /// Color at `(x, y)`, or `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| from_binary(self.pixels[i]))
    }

    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p == BinaryColor::On).count()
    }

    /// `#` for ink, `.` for paper, one line per row
    pub fn to_ascii(&self) -> String {
        let width = self.size.width as usize;
        let mut out = String::with_capacity(self.pixels.len() + self.size.height as usize);
        for row in self.pixels.chunks(width.max(1)) {
            out.extend(row.iter().map(|p| if *p == BinaryColor::On { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point.x, point.y) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

/// Framebuffer-backed [`DrawSurface`] for a landscape panel
#[derive(Debug, Clone)]
pub struct EpdSurface {
    frame: Framebuffer,
    committed: Framebuffer,
    cursor: Point,
    font: FontId,
    text_scale: u8,
    commits: usize,
}

impl EpdSurface {
    /// Surface sized for the given layout's panel
    pub fn for_layout(layout: &ChartLayout) -> Self {
        let width = layout.panel_width.max(0) as u32;
        let height = layout.panel_height.max(0) as u32;
        Self {
            frame: Framebuffer::new(width, height),
            committed: Framebuffer::new(width, height),
            cursor: Point::zero(),
            font: FontId::Default,
            text_scale: 1,
            commits: 0,
        }
    }

    /// Working frame, including uncommitted drawing
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    /// Last frame pushed with `commit`
    pub fn committed(&self) -> &Framebuffer {
        &self.committed
    }

    pub fn commit_count(&self) -> usize {
        self.commits
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.cursor.x, self.cursor.y)
    }

    /// Horizontal line clipped to the panel before rasterizing
    fn hline(&mut self, x: i32, y: i32, width: i32, color: Color) {
        let Size { width: w, height: h } = self.frame.size;
        if y < 0 || i64::from(y) >= i64::from(h) {
            return;
        }
        if let Some((x0, x1)) = clip_span(x, width, w) {
            let style = PrimitiveStyle::with_stroke(to_binary(color), 1);
            let line = Line::new(Point::new(x0, y), Point::new(x1, y));
            infallible(line.into_styled(style).draw(&mut self.frame));
        }
    }

    /// Vertical line clipped to the panel before rasterizing
    fn vline(&mut self, x: i32, y: i32, length: i32, color: Color) {
        let Size { width: w, height: h } = self.frame.size;
        if x < 0 || i64::from(x) >= i64::from(w) {
            return;
        }
        if let Some((y0, y1)) = clip_span(y, length, h) {
            let style = PrimitiveStyle::with_stroke(to_binary(color), 1);
            let line = Line::new(Point::new(x, y0), Point::new(x, y1));
            infallible(line.into_styled(style).draw(&mut self.frame));
        }
    }

    /// Write the last committed frame as a grayscale PNG
    #[cfg(feature = "png-export")]
    pub fn save_png(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let Size { width, height } = self.committed.size;
        let snapshot = image::GrayImage::from_fn(width, height, |x, y| {
            match self.committed.pixel(x as i32, y as i32) {
                Some(Color::Black) => image::Luma([0u8]),
                _ => image::Luma([255u8]),
            }
        });
        snapshot.save(path)?;
        debug!(path = %path.display(), "Saved frame snapshot");
        Ok(())
    }
}

impl Default for EpdSurface {
    fn default() -> Self {
        Self::for_layout(&ChartLayout::EPD_2IN9)
    }
}

impl DrawSurface for EpdSurface {
    /// Zero-height rectangles draw as a one-pixel horizontal line.
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) -> Result<()> {
        if width <= 0 {
            return Ok(());
        }
        if height <= 0 {
            self.hline(x, y, width, color);
            return Ok(());
        }

        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);
        self.hline(x, y, width, color);
        self.hline(x, bottom, width, color);
        self.vline(x, y, height, color);
        self.vline(right, y, height, color);
        Ok(())
    }

    fn draw_vline(&mut self, x: i32, y: i32, length: i32, color: Color) -> Result<()> {
        self.vline(x, y, length, color);
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.cursor = Point::new(x, y);
        Ok(())
    }

    fn set_font(&mut self, font: FontId) -> Result<()> {
        self.font = font;
        Ok(())
    }

    fn set_text_scale(&mut self, scale: u8) -> Result<()> {
        self.text_scale = scale.max(1);
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        let (font, baseline) = face(self.font, self.text_scale);
        let style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build();

        self.cursor = infallible(
            Text::with_baseline(text, self.cursor, style, baseline).draw(&mut self.frame),
        );
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        infallible(self.frame.clear(to_binary(color)));
        self.cursor = Point::zero();
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.committed = self.frame.clone();
        self.commits += 1;
        debug!(
            commit = self.commits,
            ink = self.committed.ink_count(),
            "Committed frame"
        );
        Ok(())
    }
}

/// Mono font and anchor for a font family at a text scale.
///
/// Mono fonts do not scale, so scale 2 and above selects the larger face.
fn face(font: FontId, scale: u8) -> (&'static MonoFont<'static>, Baseline) {
    match (font, scale) {
        (FontId::Default, 0..=1) => (&FONT_6X10, Baseline::Top),
        (FontId::Default, _) => (&FONT_10X20, Baseline::Top),
        (FontId::SansBold, 0..=1) => (&FONT_7X13_BOLD, Baseline::Alphabetic),
        (FontId::SansBold, _) => (&FONT_9X18_BOLD, Baseline::Alphabetic),
    }
}

/// Visible part of `[start, start + len)` within `[0, limit)`, as inclusive ends
fn clip_span(start: i32, len: i32, limit: u32) -> Option<(i32, i32)> {
    if len <= 0 {
        return None;
    }
    let first = i64::from(start).max(0);
    let last = (i64::from(start) + i64::from(len) - 1).min(i64::from(limit) - 1);
    (first <= last).then_some((first as i32, last as i32))
}

fn to_binary(color: Color) -> BinaryColor {
    match color {
        Color::Black => BinaryColor::On,
        Color::White => BinaryColor::Off,
    }
}

fn from_binary(color: BinaryColor) -> Color {
    match color {
        BinaryColor::On => Color::Black,
        BinaryColor::Off => Color::White,
    }
}

fn infallible<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
