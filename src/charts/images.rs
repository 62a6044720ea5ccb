//! Heat-image charts: confusion matrix, heatmap and filter grids.

use super::renderer::ImageRect;
use super::{Canvas, ChartRenderer, Colormap, GridShape};
use crate::data::{Activations, FilterWeights};
use crate::error::{RenderError, RenderResult};
use crate::metrics::{normalize_rows, validate_confusion_shape, value_range};
use image::RgbImage;
use ndarray::{ArrayView2, ArrayViewD};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

// Space around heat images, and room for class names (pixels)
const OUTER_MARGIN: i32 = 10;
const CELL_PADDING: f64 = 2.0;
const LABEL_GUTTER_LEFT: f64 = 110.0;
const LABEL_GUTTER_BOTTOM: f64 = 64.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionOptions {
    /// Divide each row by its sum before drawing
    pub normalize: bool,
    pub title: String,
    pub colormap: Colormap,
}

impl Default for ConfusionOptions {
    fn default() -> Self {
        Self {
            normalize: false,
            title: "Confusion matrix".to_string(),
            colormap: Colormap::Blues,
        }
    }
}

impl ConfusionOptions {
    pub fn normalized() -> Self {
        Self {
            normalize: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterGridOptions {
    /// Input channel whose weights are shown for every filter
    pub input_channel: usize,
    /// Fixed layout; a square grid sized to the filter count when `None`
    pub grid: Option<GridShape>,
}

impl ChartRenderer {
    /// Heat image of a confusion matrix with per-cell values and class ticks.
    pub fn render_confusion_matrix<S: AsRef<str>>(
        &self,
        matrix: ArrayView2<'_, f64>,
        class_labels: &[S],
        output_path: impl AsRef<Path>,
        options: &ConfusionOptions,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering confusion matrix to {}", output_path.display());
        self.confusion_canvas(matrix, class_labels, options)?
            .save(output_path)
    }

    pub fn draw_confusion_matrix<S: AsRef<str>>(
        &self,
        matrix: ArrayView2<'_, f64>,
        class_labels: &[S],
        options: &ConfusionOptions,
    ) -> RenderResult<RgbImage> {
        self.confusion_canvas(matrix, class_labels, options)?
            .into_image()
    }

    fn confusion_canvas<S: AsRef<str>>(
        &self,
        matrix: ArrayView2<'_, f64>,
        class_labels: &[S],
        options: &ConfusionOptions,
    ) -> RenderResult<Canvas> {
        validate_confusion_shape(&matrix, class_labels.len())?;

        let cm = if options.normalize {
            tracing::debug!("Normalized confusion matrix");
            normalize_rows(&matrix)
        } else {
            tracing::debug!("Confusion matrix, without normalization");
            matrix.to_owned()
        };
        tracing::debug!("\n{}", cm);

        let range = value_range(cm.iter()).unwrap_or((0.0, 0.0));
        let mut canvas = self.canvas()?;
        canvas.draw(self.colors.background, |root| {
            self.draw_confusion(root, &cm.view(), class_labels, options, range)
        })?;
        Ok(canvas)
    }

    fn draw_confusion<DB: DrawingBackend, S: AsRef<str>>(
        &self,
        root: &DrawingArea<DB, Shift>,
        cm: &ArrayView2<'_, f64>,
        class_labels: &[S],
        options: &ConfusionOptions,
        (min, max): (f64, f64),
    ) -> RenderResult<()> {
        let area = root.margin(OUTER_MARGIN, OUTER_MARGIN, OUTER_MARGIN, OUTER_MARGIN);
        let area = match self.font(self.style.title_size) {
            Some(font) if !options.title.is_empty() => {
                area.titled(&options.title, font.color(&self.colors.text))?
            }
            _ => area,
        };
        let (main, bar) = split_colorbar(&area);

        let (gutter_left, gutter_bottom) = if self.has_text() {
            (LABEL_GUTTER_LEFT, LABEL_GUTTER_BOTTOM)
        } else {
            (CELL_PADDING, CELL_PADDING)
        };
        let (w, h) = main.dim_in_pixel();
        let n = cm.nrows();
        let rect = ImageRect::fit(
            (gutter_left, CELL_PADDING),
            (
                w as f64 - gutter_left - CELL_PADDING,
                h as f64 - gutter_bottom - CELL_PADDING,
            ),
            n,
            n,
        );
        draw_matrix(&main, cm, rect, options.colormap, (min, max))?;
        main.draw(&Rectangle::new(rect.bounds(), self.colors.axis.stroke_width(1)))?;

        for ((row, col), &value) in cm.indexed_iter() {
            let text = if options.normalize {
                format!("{:.2}", value)
            } else {
                format!("{:.0}", value)
            };
            let color = annotation_color(value, max);
            self.draw_text(
                &main,
                &text,
                rect.center(row, col),
                self.style.annotation_size,
                &color,
                Pos::new(HPos::Center, VPos::Center),
            )?;
        }

        let [(left, top), (right, bottom)] = rect.bounds();
        let tick_style = self.colors.axis.stroke_width(1);
        for (i, label) in class_labels.iter().enumerate() {
            let (cx, cy) = rect.center(i, i);
            main.draw(&PathElement::new(vec![(cx, bottom), (cx, bottom + 4)], tick_style))?;
            main.draw(&PathElement::new(vec![(left - 4, cy), (left, cy)], tick_style))?;
            self.draw_text(
                &main,
                label.as_ref(),
                (cx, bottom + 6),
                self.style.label_size,
                &self.colors.text,
                Pos::new(HPos::Center, VPos::Top),
            )?;
            self.draw_text(
                &main,
                label.as_ref(),
                (left - 6, cy),
                self.style.label_size,
                &self.colors.text,
                Pos::new(HPos::Right, VPos::Center),
            )?;
        }

        self.draw_text(
            &main,
            "Predicted label",
            ((left + right) / 2, bottom + 34),
            self.style.label_size,
            &self.colors.text,
            Pos::new(HPos::Center, VPos::Top),
        )?;
        self.draw_text_rotated(
            &main,
            "True label",
            (14, (top + bottom) / 2),
            self.style.label_size,
            &self.colors.text,
        )?;

        self.draw_colorbar(&bar, options.colormap, (min, max))
    }

    /// Heat image of a 2D array with a vertical colorbar and no axes.
    pub fn render_heatmap(
        &self,
        array: ArrayView2<'_, f64>,
        output_path: impl AsRef<Path>,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering heatmap to {}", output_path.display());
        self.heatmap_canvas(array)?.save(output_path)
    }

    pub fn draw_heatmap(&self, array: ArrayView2<'_, f64>) -> RenderResult<RgbImage> {
        self.heatmap_canvas(array)?.into_image()
    }

    fn heatmap_canvas(&self, array: ArrayView2<'_, f64>) -> RenderResult<Canvas> {
        if array.is_empty() {
            return Err(RenderError::Degenerate("heatmap array is empty"));
        }
        let colormap = self.style.heatmap_colormap;
        let range = value_range(array.iter()).unwrap_or((0.0, 0.0));
        let (rows, cols) = array.dim();

        let mut canvas = self.canvas()?;
        canvas.draw(self.colors.background, |root| {
            let area = root.margin(OUTER_MARGIN, OUTER_MARGIN, OUTER_MARGIN, OUTER_MARGIN);
            let (main, bar) = split_colorbar(&area);
            let (w, h) = main.dim_in_pixel();
            let rect = ImageRect::fit((0.0, 0.0), (w as f64, h as f64), rows, cols);
            draw_matrix(&main, &array, rect, colormap, range)?;
            self.draw_colorbar(&bar, colormap, range)
        })?;
        Ok(canvas)
    }

    /// Tile one input channel of every convolution filter on a shared colour scale.
    pub fn render_filter_grid(
        &self,
        weights: ArrayViewD<'_, f64>,
        output_path: impl AsRef<Path>,
        options: &FilterGridOptions,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering filter grid to {}", output_path.display());
        self.filter_grid_canvas(weights, options)?.save(output_path)
    }

    pub fn draw_filter_grid(
        &self,
        weights: ArrayViewD<'_, f64>,
        options: &FilterGridOptions,
    ) -> RenderResult<RgbImage> {
        self.filter_grid_canvas(weights, options)?.into_image()
    }

    fn filter_grid_canvas(
        &self,
        weights: ArrayViewD<'_, f64>,
        options: &FilterGridOptions,
    ) -> RenderResult<Canvas> {
        let weights = FilterWeights::new(weights)?;
        weights.check_channel(options.input_channel)?;
        let shape = GridShape::resolve(options.grid, weights.filter_count())?;

        // one scale for every filter so they can be compared
        let range = value_range(weights.values()).unwrap_or((0.0, 0.0));
        let tiles: Vec<_> = (0..weights.filter_count())
            .map(|i| (weights.slice(options.input_channel, i), range))
            .collect();

        let mut canvas = self.canvas()?;
        canvas.draw(self.colors.background, |root| {
            self.draw_grid(root, shape, &tiles, range)
        })?;
        Ok(canvas)
    }

    /// Tile the first sample's output of every filter, each on its own scale.
    pub fn render_activation_grid(
        &self,
        values: ArrayViewD<'_, f64>,
        output_path: impl AsRef<Path>,
        grid: Option<GridShape>,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering activation grid to {}", output_path.display());
        self.activation_grid_canvas(values, grid)?.save(output_path)
    }

    pub fn draw_activation_grid(
        &self,
        values: ArrayViewD<'_, f64>,
        grid: Option<GridShape>,
    ) -> RenderResult<RgbImage> {
        self.activation_grid_canvas(values, grid)?.into_image()
    }

    fn activation_grid_canvas(
        &self,
        values: ArrayViewD<'_, f64>,
        grid: Option<GridShape>,
    ) -> RenderResult<Canvas> {
        let activations = Activations::new(values)?;
        let shape = GridShape::resolve(grid, activations.filter_count())?;

        let tiles: Vec<_> = (0..activations.filter_count())
            .map(|i| {
                let image = activations.slice(i);
                let range = value_range(image.iter()).unwrap_or((0.0, 0.0));
                (image, range)
            })
            .collect();
        // colorbar follows the last tile drawn
        let colorbar = tiles.last().map_or((0.0, 0.0), |(_, range)| *range);

        let mut canvas = self.canvas()?;
        canvas.draw(self.colors.background, |root| {
            self.draw_grid(root, shape, &tiles, colorbar)
        })?;
        Ok(canvas)
    }

    fn draw_grid<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        shape: GridShape,
        tiles: &[(ArrayView2<'_, f64>, (f64, f64))],
        colorbar: (f64, f64),
    ) -> RenderResult<()> {
        let colormap = self.style.heatmap_colormap;
        let area = root.margin(OUTER_MARGIN, OUTER_MARGIN, OUTER_MARGIN, OUTER_MARGIN);
        let (grid_area, bar) = split_colorbar(&area);

        // cells past the last tile stay blank
        let cells = grid_area.split_evenly((shape.rows, shape.cols));
        for (cell, (image, range)) in cells.iter().zip(tiles) {
            let (rows, cols) = image.dim();
            if rows == 0 || cols == 0 {
                continue;
            }
            let (w, h) = cell.dim_in_pixel();
            let rect = ImageRect::fit(
                (CELL_PADDING, CELL_PADDING),
                (w as f64 - 2.0 * CELL_PADDING, h as f64 - 2.0 * CELL_PADDING),
                rows,
                cols,
            );
            draw_matrix(cell, image, rect, colormap, *range)?;
        }

        self.draw_colorbar(&bar, colormap, colorbar)
    }
}

/// Light text on cells above half the maximum, dark text elsewhere.
fn annotation_color(value: f64, max: f64) -> RGBColor {
    if value > max / 2.0 {
        WHITE
    } else {
        BLACK
    }
}

/// Split off a strip on the right for the colorbar.
fn split_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    let (w, _) = area.dim_in_pixel();
    let w = w as i32;
    let bar_width = (w / 7).max(40).min(w / 2);
    area.split_horizontally(w - bar_width)
}

/// Nearest-neighbour fill of `image`, one rectangle per element.
fn draw_matrix<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    image: &ArrayView2<'_, f64>,
    rect: ImageRect,
    colormap: Colormap,
    (min, max): (f64, f64),
) -> RenderResult<()> {
    for ((row, col), &value) in image.indexed_iter() {
        area.draw(&Rectangle::new(
            rect.cell(row, col),
            colormap.color_for(value, min, max).filled(),
        ))?;
    }
    Ok(())
}
