//! Line charts: series comparison, training curves and ROC.

use super::{Canvas, ChartRenderer};
use crate::data::{Metric, TrainingHistory};
use crate::error::{RenderError, RenderResult};
use crate::metrics::{roc_curve, value_range};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);
const NAVY: RGBColor = RGBColor(0, 0, 128);

// Dash length and gap of dashed series (pixels)
const DASH: (i32, i32) = (8, 6);

/// Text for a two-series comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartLabels {
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    /// Legend entries for the first and second series
    pub legend: [String; 2],
}

impl LineChartLabels {
    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        title: impl Into<String>,
        legend: [&str; 2],
    ) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            title: title.into(),
            legend: legend.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LegendCorner {
    UpperRight,
    LowerRight,
}

impl LegendCorner {
    fn position(self) -> SeriesLabelPosition {
        match self {
            LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
            LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

struct Series {
    label: Option<String>,
    points: Vec<(f64, f64)>,
    color: RGBColor,
    dashed: bool,
}

impl Series {
    fn solid(label: &str, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            label: Some(label.to_string()),
            points,
            color,
            dashed: false,
        }
    }
}

/// One set of axes with its series.
struct LinePanel {
    title: String,
    x_label: String,
    y_label: String,
    x_range: Range<f64>,
    y_range: Range<f64>,
    /// Only label whole-number x ticks (epochs, indices)
    integer_x: bool,
    legend: LegendCorner,
    series: Vec<Series>,
}

impl ChartRenderer {
    /// Plot two series against their index on shared axes.
    pub fn render_line_comparison(
        &self,
        series_a: &[f64],
        series_b: &[f64],
        labels: &LineChartLabels,
        output_path: impl AsRef<Path>,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering line comparison '{}' to {}", labels.title, output_path.display());
        self.line_comparison_canvas(series_a, series_b, labels)?
            .save(output_path)
    }

    pub fn draw_line_comparison(
        &self,
        series_a: &[f64],
        series_b: &[f64],
        labels: &LineChartLabels,
    ) -> RenderResult<RgbImage> {
        self.line_comparison_canvas(series_a, series_b, labels)?
            .into_image()
    }

    fn line_comparison_canvas(
        &self,
        series_a: &[f64],
        series_b: &[f64],
        labels: &LineChartLabels,
    ) -> RenderResult<Canvas> {
        if series_a.is_empty() && series_b.is_empty() {
            return Err(RenderError::Degenerate("both series are empty"));
        }
        if series_a.iter().chain(series_b).any(|v| !v.is_finite()) {
            return Err(RenderError::NonFinite { what: "line series" });
        }

        let longest = series_a.len().max(series_b.len());
        let (lo, hi) = value_range(series_a.iter().chain(series_b)).unwrap_or((0.0, 1.0));
        let indexed = |values: &[f64]| -> Vec<(f64, f64)> {
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
        };

        let panel = LinePanel {
            title: labels.title.clone(),
            x_label: labels.x_label.clone(),
            y_label: labels.y_label.clone(),
            x_range: padded_range(0.0, (longest - 1) as f64),
            y_range: padded_range(lo, hi),
            integer_x: true,
            legend: LegendCorner::UpperRight,
            series: vec![
                Series::solid(&labels.legend[0], indexed(series_a), self.colors.series[0]),
                Series::solid(&labels.legend[1], indexed(series_b), self.colors.series[1]),
            ],
        };

        let mut canvas = self.canvas()?;
        canvas.draw(self.colors.background, |root| self.draw_panel(root, &panel))?;
        Ok(canvas)
    }

    /// Accuracy and loss side by side, train vs validation, per epoch.
    pub fn render_training_curves(
        &self,
        history: &TrainingHistory,
        output_path: impl AsRef<Path>,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering training curves to {}", output_path.display());
        self.training_curves_canvas(history)?.save(output_path)
    }

    pub fn draw_training_curves(&self, history: &TrainingHistory) -> RenderResult<RgbImage> {
        self.training_curves_canvas(history)?.into_image()
    }

    fn training_curves_canvas(&self, history: &TrainingHistory) -> RenderResult<Canvas> {
        let accuracy = history.paired(Metric::Accuracy, Metric::ValidationAccuracy)?;
        let loss = history.paired(Metric::Loss, Metric::ValidationLoss)?;

        let panels = [
            self.epoch_panel("Model Accuracy", "Accuracy", accuracy, LegendCorner::LowerRight),
            self.epoch_panel("Model Loss", "Loss", loss, LegendCorner::UpperRight),
        ];

        let (width, height) = self.style.training_size()?;
        let mut canvas = Canvas::begin(width, height);
        canvas.draw(self.colors.background, |root| {
            let (width, _) = root.dim_in_pixel();
            let (left, right) = root.split_horizontally(width as i32 / 2);
            self.draw_panel(&left, &panels[0])?;
            self.draw_panel(&right, &panels[1])
        })?;
        Ok(canvas)
    }

    fn epoch_panel(
        &self,
        title: &str,
        y_label: &str,
        (train, validation): (&[f64], &[f64]),
        legend: LegendCorner,
    ) -> LinePanel {
        // epochs are 1-based
        let by_epoch = |values: &[f64]| -> Vec<(f64, f64)> {
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| ((i + 1) as f64, v))
                .collect()
        };
        let (lo, hi) = value_range(train.iter().chain(validation)).unwrap_or((0.0, 1.0));

        LinePanel {
            title: title.to_string(),
            x_label: "Epoch".to_string(),
            y_label: y_label.to_string(),
            x_range: padded_range(1.0, train.len() as f64),
            y_range: padded_range(lo, hi),
            integer_x: true,
            legend,
            series: vec![
                Series::solid("train", by_epoch(train), self.colors.series[0]),
                Series::solid("validation", by_epoch(validation), self.colors.series[1]),
            ],
        }
    }

    /// Draw the ROC curve of `scores` against binary `true_labels` and return its AUC.
    pub fn render_roc(
        &self,
        true_labels: &[u8],
        scores: &[f64],
        output_path: impl AsRef<Path>,
    ) -> RenderResult<f64> {
        let output_path = output_path.as_ref();
        tracing::debug!("Rendering ROC curve to {}", output_path.display());
        let (canvas, auc) = self.roc_canvas(true_labels, scores)?;
        canvas.save(output_path)?;
        Ok(auc)
    }

    pub fn draw_roc(&self, true_labels: &[u8], scores: &[f64]) -> RenderResult<(RgbImage, f64)> {
        let (canvas, auc) = self.roc_canvas(true_labels, scores)?;
        Ok((canvas.into_image()?, auc))
    }

    fn roc_canvas(&self, true_labels: &[u8], scores: &[f64]) -> RenderResult<(Canvas, f64)> {
        let curve = roc_curve(true_labels, scores)?;
        let auc = curve.auc();
        tracing::info!("ROC AUC: {:.4}", auc);

        let points = curve.fpr.iter().copied().zip(curve.tpr.iter().copied()).collect();
        let panel = LinePanel {
            title: "Receiver operating characteristic curve".to_string(),
            x_label: "False Positive Rate".to_string(),
            y_label: "True Positive Rate".to_string(),
            x_range: 0.0..1.0,
            y_range: 0.0..1.05,
            integer_x: false,
            legend: LegendCorner::LowerRight,
            series: vec![
                Series::solid(&format!("ROC curve (area = {:.2})", auc), points, DARK_ORANGE),
                Series {
                    label: None,
                    points: vec![(0.0, 0.0), (1.0, 1.0)],
                    color: NAVY,
                    dashed: true,
                },
            ],
        };

        let mut canvas = self.canvas()?;
        canvas.draw(self.colors.background, |root| self.draw_panel(root, &panel))?;
        Ok((canvas, auc))
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: &LinePanel,
    ) -> RenderResult<()> {
        let text = self.has_text();

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(16)
            .x_label_area_size(if text { 45 } else { 10 })
            .y_label_area_size(if text { 60 } else { 10 });
        if let Some(font) = self.font(self.style.title_size) {
            builder.caption(&panel.title, font.color(&self.colors.text));
        }
        let mut chart = builder.build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;
        chart.plotting_area().fill(&self.colors.panel)?;

        let x_format = |x: &f64| {
            if !panel.integer_x {
                format!("{:.1}", x)
            } else if (x - x.round()).abs() < 1e-9 {
                format!("{:.0}", x)
            } else {
                String::new()
            }
        };
        let y_format = |y: &f64| format!("{:.2}", y);
        // the mesh is all tick labels, so it needs a font
        if let Some(font) = self.font(self.style.label_size) {
            chart
                .configure_mesh()
                .bold_line_style(self.colors.grid.stroke_width(1))
                .light_line_style(self.colors.grid.mix(0.5).stroke_width(1))
                .axis_style(self.colors.axis.stroke_width(1))
                .label_style(font.color(&self.colors.text))
                .x_desc(panel.x_label.as_str())
                .y_desc(panel.y_label.as_str())
                .x_labels(10)
                .y_labels(8)
                .x_label_formatter(&x_format)
                .y_label_formatter(&y_format)
                .draw()?;
        }

        for series in &panel.series {
            let style = series.color.stroke_width(2);
            if series.dashed {
                chart.draw_series(DashedLineSeries::new(
                    series.points.iter().copied(),
                    DASH.0,
                    DASH.1,
                    style,
                ))?;
                continue;
            }

            let anno = chart.draw_series(LineSeries::new(series.points.iter().copied(), style))?;
            if let Some(label) = &series.label {
                let color = series.color;
                anno.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        let labelled = panel.series.iter().any(|s| s.label.is_some());
        if let (Some(font), true) = (self.font(self.style.label_size), labelled) {
            chart
                .configure_series_labels()
                .position(panel.legend.position())
                .label_font(font.color(&self.colors.text))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        Ok(())
    }
}

/// Axis range around `[lo, hi]` with a little headroom; flat data gets a unit span.
fn padded_range(lo: f64, hi: f64) -> Range<f64> {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    } else {
        (lo - 0.5)..(hi + 0.5)
    }
}
