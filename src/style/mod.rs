//! Style module - Theme configuration and fonts

mod config;
mod font;

pub use config::{RenderStyle, Theme, ThemeColors, MIN_CANVAS};
pub use font::Typeface;
