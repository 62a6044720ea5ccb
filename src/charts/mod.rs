//! Charts module - Chart rendering

mod canvas;
mod colormap;
mod grid;
mod images;
mod lines;
mod renderer;

pub use canvas::Canvas;
pub use colormap::Colormap;
pub use grid::GridShape;
pub use images::{ConfusionOptions, FilterGridOptions};
pub use lines::LineChartLabels;
pub use renderer::ChartRenderer;
