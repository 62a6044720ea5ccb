//! Render errors shared by every chart operation.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Input dimensions do not match what the chart needs.
    #[error("invalid shape for {what}: expected {expected}, got {actual}")]
    Shape {
        what: &'static str,
        expected: String,
        actual: String,
    },
    #[error("training history has no '{0}' metric")]
    MissingMetric(String),
    #[error("label at index {index} is {value}, expected 0 or 1")]
    InvalidLabel { index: usize, value: u8 },
    #[error("cannot render chart: {0}")]
    Degenerate(&'static str),
    #[error("{what} contains NaN or infinite values")]
    NonFinite { what: &'static str },
    #[error("{what} canvas {width}x{height} is smaller than the minimum {min_width}x{min_height}")]
    CanvasTooSmall {
        what: &'static str,
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("font error: {0}")]
    Font(String),
    #[error("invalid style configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn shape(
        what: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        RenderError::Shape {
            what,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => RenderError::Io(io),
            other => RenderError::Encode(other),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}
