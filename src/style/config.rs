//! Render Style Configuration
//! One-time visual settings applied when a renderer is constructed.

use crate::charts::Colormap;
use crate::error::{RenderError, RenderResult};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest single-panel canvas charts can be laid out on, in pixels.
pub const MIN_CANVAS: (u32, u32) = (200, 150);

/// Visual theme for axes-based charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Grey panel, white grid, muted colour cycle
    #[default]
    Ggplot,
    /// White panel, light grey grid
    Classic,
}

/// Concrete colours resolved from a theme.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub background: RGBColor,
    pub panel: RGBColor,
    pub grid: RGBColor,
    pub axis: RGBColor,
    pub text: RGBColor,
    pub series: [RGBColor; 2],
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Ggplot => ThemeColors {
                background: RGBColor(255, 255, 255),
                panel: RGBColor(229, 229, 229),
                grid: RGBColor(255, 255, 255),
                axis: RGBColor(188, 188, 188),
                text: RGBColor(85, 85, 85),
                series: [RGBColor(226, 74, 51), RGBColor(52, 138, 189)],
            },
            Theme::Classic => ThemeColors {
                background: RGBColor(255, 255, 255),
                panel: RGBColor(255, 255, 255),
                grid: RGBColor(220, 220, 220),
                axis: RGBColor(0, 0, 0),
                text: RGBColor(0, 0, 0),
                series: [RGBColor(31, 119, 180), RGBColor(255, 127, 14)],
            },
        }
    }
}

/// Style settings for a [`ChartRenderer`](crate::ChartRenderer).
///
/// Every field has a default, so a style file only needs the keys it changes:
///
/// ```json
/// { "theme": "classic", "width": 800, "font_path": "/opt/fonts/Inter.ttf" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub theme: Theme,
    /// Size of single-panel charts in pixels
    pub width: u32,
    pub height: u32,
    /// Size of the two-panel training curves chart
    pub training_width: u32,
    pub training_height: u32,
    /// Family name the font is registered under
    pub font_family: String,
    /// TrueType font to use; the bundled DejaVu Sans when unset
    pub font_path: Option<PathBuf>,
    pub title_size: u32,
    pub label_size: u32,
    /// Confusion matrix cell text
    pub annotation_size: u32,
    /// Colormap for heatmaps and filter grids
    pub heatmap_colormap: Colormap,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            theme: Theme::Ggplot,
            width: 640,
            height: 480,
            training_width: 1500,
            training_height: 500,
            font_family: "sans-serif".to_string(),
            font_path: None,
            title_size: 20,
            label_size: 14,
            annotation_size: 20,
            heatmap_colormap: Colormap::Viridis,
        }
    }
}

impl RenderStyle {
    /// Parse a style from JSON text.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn colors(&self) -> ThemeColors {
        self.theme.colors()
    }

    /// Check that every canvas is large enough to lay a chart out on.
    pub fn validate(&self) -> RenderResult<()> {
        self.chart_size()?;
        self.training_size()?;
        Ok(())
    }

    /// Size of single-panel charts, checked against [`MIN_CANVAS`].
    pub(crate) fn chart_size(&self) -> RenderResult<(u32, u32)> {
        check_canvas("chart", (self.width, self.height), MIN_CANVAS)
    }

    /// Size of the training curves chart; each of its two panels needs [`MIN_CANVAS`].
    pub(crate) fn training_size(&self) -> RenderResult<(u32, u32)> {
        check_canvas(
            "training curves",
            (self.training_width, self.training_height),
            (2 * MIN_CANVAS.0, MIN_CANVAS.1),
        )
    }
}

fn check_canvas(
    what: &'static str,
    (width, height): (u32, u32),
    (min_width, min_height): (u32, u32),
) -> RenderResult<(u32, u32)> {
    if width < min_width || height < min_height {
        return Err(RenderError::CanvasTooSmall {
            what,
            width,
            height,
            min_width,
            min_height,
        });
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let style = RenderStyle::from_json(r#"{ "theme": "classic", "width": 800 }"#).unwrap();
        assert_eq!(style.theme, Theme::Classic);
        assert_eq!(style.width, 800);
        assert_eq!(style.height, 480);
        assert_eq!(style.heatmap_colormap, Colormap::Viridis);
    }

    #[test]
    fn unknown_theme_is_config_error() {
        let err = RenderStyle::from_json(r#"{ "theme": "seaborn" }"#).unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let err = RenderStyle::from_json(r#"{ "width": 60, "height": 40 }"#).unwrap_err();
        assert!(matches!(
            err,
            RenderError::CanvasTooSmall { what: "chart", width: 60, height: 40, .. }
        ));

        let err = RenderStyle::from_json(r#"{ "training_width": 300 }"#).unwrap_err();
        assert!(matches!(
            err,
            RenderError::CanvasTooSmall { what: "training curves", min_width: 400, .. }
        ));
    }

    #[test]
    fn minimum_canvas_is_accepted() {
        let style = RenderStyle {
            width: MIN_CANVAS.0,
            height: MIN_CANVAS.1,
            ..RenderStyle::default()
        };
        assert!(style.validate().is_ok());
        assert_eq!(style.chart_size().unwrap(), MIN_CANVAS);
    }

    #[test]
    fn colormap_names_are_lowercase() {
        let style = RenderStyle::from_json(r#"{ "heatmap_colormap": "greys" }"#).unwrap();
        assert_eq!(style.heatmap_colormap, Colormap::Greys);
    }
}
