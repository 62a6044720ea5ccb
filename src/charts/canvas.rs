//! Per-call drawing surface.
//!
//! Each chart draws into its own pixel buffer, so nothing carries over from
//! one render to the next. The buffer is encoded with `image` when saved.

use crate::error::{RenderError, RenderResult};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Start a blank RGB canvas.
    pub fn begin(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fill the canvas with `background`, then run `paint` on the root area.
    pub fn draw<F>(&mut self, background: RGBColor, paint: F) -> RenderResult<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> RenderResult<()>,
    {
        let root =
            BitMapBackend::with_buffer(&mut self.pixels, (self.width, self.height)).into_drawing_area();
        root.fill(&background)?;
        paint(&root)?;
        root.present()?;
        Ok(())
    }

    pub fn into_image(self) -> RenderResult<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.pixels)
            .ok_or_else(|| RenderError::Draw("canvas buffer does not match its size".to_string()))
    }

    /// Encode and write the canvas, replacing any existing file.
    ///
    /// The format follows the file extension, PNG when there is none.
    pub fn save(self, path: &Path) -> RenderResult<()> {
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        self.into_image()?.save_with_format(path, format)?;
        tracing::debug!("Saved chart to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_fills_background() {
        let mut canvas = Canvas::begin(8, 4);
        canvas.draw(RGBColor(10, 20, 30), |_| Ok(())).unwrap();
        let img = canvas.into_image().unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        assert!(img.pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn paint_errors_propagate() {
        let mut canvas = Canvas::begin(4, 4);
        let err = canvas
            .draw(WHITE, |_| Err(RenderError::Degenerate("nothing to draw")))
            .unwrap_err();
        assert!(matches!(err, RenderError::Degenerate(_)));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");
        let err = Canvas::begin(4, 4).save(&path).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)), "got {err:?}");
    }
}
