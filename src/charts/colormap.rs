//! Colormaps for heat images, sampled by linear interpolation between stops.
//!
//! Viridis comes from plotters; the sequential maps plotters lacks are
//! tabulated here.

use plotters::prelude::ViridisRGB;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

const GREYS: [(u8, u8, u8); 9] = [
    (255, 255, 255),
    (240, 240, 240),
    (217, 217, 217),
    (189, 189, 189),
    (150, 150, 150),
    (115, 115, 115),
    (82, 82, 82),
    (37, 37, 37),
    (0, 0, 0),
];

const ORANGES: [(u8, u8, u8); 9] = [
    (255, 245, 235),
    (254, 230, 206),
    (253, 208, 162),
    (253, 174, 107),
    (253, 141, 60),
    (241, 105, 19),
    (217, 72, 1),
    (166, 54, 3),
    (127, 39, 4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Blues,
    #[default]
    Viridis,
    Greys,
    Oranges,
}

impl Colormap {
    /// Colour at position `t`, clamped to `[0, 1]`.
    pub fn color_at(self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops: &[(u8, u8, u8)] = match self {
            Colormap::Viridis => return ViridisRGB::get_color(t),
            Colormap::Blues => &BLUES,
            Colormap::Greys => &GREYS,
            Colormap::Oranges => &ORANGES,
        };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lower as f64;

        let (r0, g0, b0) = stops[lower];
        let (r1, g1, b1) = stops[lower + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// Colour for `value` on the scale `[min, max]`.
    ///
    /// A flat scale maps everything to the middle of the colormap.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> RGBColor {
        if max > min {
            self.color_at((value - min) / (max - min))
        } else {
            self.color_at(0.5)
        }
    }
}
