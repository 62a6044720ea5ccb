//! Chart Renderer
//! Static training and evaluation charts saved as image files.
//!
//! Every operation starts a fresh [`Canvas`], draws on it and writes exactly
//! one file. The `draw_*` siblings return the image instead of saving it.
//!
//! Line-style charts (comparisons, training curves, ROC) live in `lines.rs`;
//! heat-image charts (confusion matrix, heatmap, filter grids) in `images.rs`.
//! This file holds the renderer itself and the drawing helpers they share.

use super::{Canvas, Colormap};
use crate::error::RenderResult;
use crate::style::{RenderStyle, ThemeColors, Typeface};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontTransform};

// Colorbar layout (pixels)
const COLORBAR_OFFSET: i32 = 8;
const COLORBAR_TICKS: usize = 5;

/// Renders charts with one style applied for its whole lifetime.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    pub(crate) style: RenderStyle,
    pub(crate) colors: ThemeColors,
    pub(crate) typeface: Typeface,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(RenderStyle::default())
    }
}

impl ChartRenderer {
    /// Apply `style` once. Resolves and registers the font for chart text.
    pub fn new(style: RenderStyle) -> Self {
        let typeface = Typeface::resolve(&style);
        Self::with_typeface(style, typeface)
    }

    /// Renderer that never draws text. Layouts shrink to the bare images.
    pub fn without_text(style: RenderStyle) -> Self {
        Self::with_typeface(style, Typeface::without_text())
    }

    fn with_typeface(style: RenderStyle, typeface: Typeface) -> Self {
        Self {
            colors: style.colors(),
            style,
            typeface,
        }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Whether labels, titles and legends are drawn.
    pub fn has_text(&self) -> bool {
        self.typeface.has_text()
    }

    /// Blank single-panel canvas, or an error if the style's size is too small.
    pub(crate) fn canvas(&self) -> RenderResult<Canvas> {
        let (width, height) = self.style.chart_size()?;
        Ok(Canvas::begin(width, height))
    }

    /// Font of `size` points, or `None` when text is disabled.
    pub(crate) fn font(&self, size: u32) -> Option<FontDesc<'_>> {
        self.typeface
            .family()
            .map(|family| (family, size as f64).into_font())
    }

    /// Draw `text` anchored at `at` in pixel coordinates. No-op without a font.
    pub(crate) fn draw_text<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        text: &str,
        at: (i32, i32),
        size: u32,
        color: &RGBColor,
        pos: Pos,
    ) -> RenderResult<()> {
        if let Some(font) = self.font(size) {
            area.draw(&Text::new(text.to_string(), at, font.color(color).pos(pos)))?;
        }
        Ok(())
    }

    /// Like [`draw_text`](Self::draw_text), turned to read bottom-to-top.
    pub(crate) fn draw_text_rotated<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        text: &str,
        at: (i32, i32),
        size: u32,
        color: &RGBColor,
    ) -> RenderResult<()> {
        if let Some(font) = self.font(size) {
            let style = font
                .transform(FontTransform::Rotate270)
                .color(color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(text.to_string(), at, style))?;
        }
        Ok(())
    }

    /// Vertical gradient bar for `colormap` over `[min, max]` with tick labels.
    pub(crate) fn draw_colorbar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        colormap: Colormap,
        (min, max): (f64, f64),
    ) -> RenderResult<()> {
        let (w, h) = area.dim_in_pixel();
        let top = (h as f64 * 0.1) as i32;
        let bottom = (h as f64 * 0.9) as i32;
        let left = COLORBAR_OFFSET;
        let right = left + (w as i32 / 4).clamp(10, 24);
        let span = (bottom - top).max(1);

        for y in top..bottom {
            let t = (bottom - y) as f64 / span as f64;
            area.draw(&Rectangle::new(
                [(left, y), (right, y + 1)],
                colormap.color_at(t).filled(),
            ))?;
        }
        area.draw(&Rectangle::new([(left, top), (right, bottom)], BLACK.stroke_width(1)))?;

        if !self.has_text() {
            return Ok(());
        }

        let ticks: Vec<(f64, i32)> = if max > min {
            (0..COLORBAR_TICKS)
                .map(|k| {
                    let frac = k as f64 / (COLORBAR_TICKS - 1) as f64;
                    (min + (max - min) * frac, bottom - (span as f64 * frac) as i32)
                })
                .collect()
        } else {
            vec![(min, (top + bottom) / 2)]
        };

        for (value, y) in ticks {
            area.draw(&PathElement::new(
                vec![(right, y), (right + 4, y)],
                BLACK.stroke_width(1),
            ))?;
            self.draw_text(
                area,
                &tick_label(value, max - min),
                (right + 6, y),
                self.style.label_size.saturating_sub(2).max(8),
                &self.colors.text,
                Pos::new(HPos::Left, VPos::Center),
            )?;
        }
        Ok(())
    }
}

/// Label for a colorbar tick, with decimals scaled to the range.
pub(crate) fn tick_label(value: f64, span: f64) -> String {
    let decimals = if span > 0.0 {
        (2.0 - span.log10().floor()).clamp(0.0, 4.0) as usize
    } else {
        2
    };
    format!("{:.*}", decimals, value)
}

/// Pixel placement of a matrix drawn with square cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ImageRect {
    left: f64,
    top: f64,
    cell: f64,
    rows: usize,
    cols: usize,
}

impl ImageRect {
    /// Largest square-celled placement centred in the given box.
    ///
    /// A box with no room left (negative or NaN size) collapses to a point.
    pub(crate) fn fit(origin: (f64, f64), size: (f64, f64), rows: usize, cols: usize) -> Self {
        let size = (size.0.max(0.0), size.1.max(0.0));
        let cell = (size.0 / cols.max(1) as f64).min(size.1 / rows.max(1) as f64);
        Self {
            left: origin.0 + (size.0 - cell * cols as f64) / 2.0,
            top: origin.1 + (size.1 - cell * rows as f64) / 2.0,
            cell,
            rows,
            cols,
        }
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> [(i32, i32); 2] {
        let x0 = self.left + col as f64 * self.cell;
        let y0 = self.top + row as f64 * self.cell;
        [
            (x0.round() as i32, y0.round() as i32),
            ((x0 + self.cell).round() as i32, (y0 + self.cell).round() as i32),
        ]
    }

    pub(crate) fn center(&self, row: usize, col: usize) -> (i32, i32) {
        (
            (self.left + (col as f64 + 0.5) * self.cell).round() as i32,
            (self.top + (row as f64 + 0.5) * self.cell).round() as i32,
        )
    }

    pub(crate) fn bounds(&self) -> [(i32, i32); 2] {
        [
            (self.left.round() as i32, self.top.round() as i32),
            (
                (self.left + self.cols as f64 * self.cell).round() as i32,
                (self.top + self.rows as f64 * self.cell).round() as i32,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_decimals_follow_range() {
        assert_eq!(tick_label(12.0, 40.0), "12.0");
        assert_eq!(tick_label(120.0, 400.0), "120");
        assert_eq!(tick_label(0.25, 1.0), "0.25");
        assert_eq!(tick_label(0.5, 0.0), "0.50");
    }

    #[test]
    fn fit_centres_square_cells() {
        let rect = ImageRect::fit((0.0, 0.0), (200.0, 100.0), 2, 2);
        assert_eq!(rect.cell(0, 0), [(50, 0), (100, 50)]);
        assert_eq!(rect.center(1, 1), (125, 75));
        assert_eq!(rect.bounds(), [(50, 0), (150, 100)]);
    }

    #[test]
    fn fit_without_room_stays_inside_origin() {
        let rect = ImageRect::fit((110.0, 2.0), (-80.0, -30.0), 2, 2);
        assert_eq!(rect.bounds(), [(110, 2), (110, 2)]);
        assert_eq!(rect.cell(1, 1), [(110, 2), (110, 2)]);
    }
}
