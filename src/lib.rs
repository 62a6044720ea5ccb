//! Training Plots - static charts for model training and evaluation
//!
//! Renders line comparisons, training curves, confusion matrices, ROC curves,
//! convolution filter grids and heatmaps to image files.
//!
//! ```no_run
//! use training_plots::{ChartRenderer, TrainingHistory};
//!
//! let history = TrainingHistory::new()
//!     .with("accuracy", vec![0.5, 0.6])
//!     .with("val_accuracy", vec![0.4, 0.55])
//!     .with("loss", vec![0.9, 0.7])
//!     .with("val_loss", vec![1.0, 0.8]);
//!
//! let renderer = ChartRenderer::default();
//! renderer.render_training_curves(&history, "training.png")?;
//! let auc = renderer.render_roc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9], "roc.png")?;
//! assert_eq!(auc, 1.0);
//! # Ok::<(), training_plots::RenderError>(())
//! ```

pub mod charts;
pub mod data;
pub mod error;
pub mod metrics;
pub mod style;

pub use charts::{
    ChartRenderer, Colormap, ConfusionOptions, FilterGridOptions, GridShape, LineChartLabels,
};
pub use data::{Metric, TrainingHistory};
pub use error::{RenderError, RenderResult};
pub use style::{RenderStyle, Theme, MIN_CANVAS};
