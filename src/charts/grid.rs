//! Grid layout for tiled filter images.

use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    /// Fixed layout for layers with up to 32 filters.
    pub const EIGHT_BY_FOUR: GridShape = GridShape { rows: 8, cols: 4 };

    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Smallest square grid holding `count` cells: side `ceil(sqrt(count))`.
    pub fn square_for(count: usize) -> Self {
        let mut side = (count as f64).sqrt().ceil() as usize;
        // correct float rounding either way
        while side * side < count {
            side += 1;
        }
        while side > 0 && (side - 1) * (side - 1) >= count {
            side -= 1;
        }
        Self::new(side, side)
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// The `fixed` shape if given, otherwise the square shape for `count`.
    pub fn resolve(fixed: Option<GridShape>, count: usize) -> RenderResult<Self> {
        if count == 0 {
            return Err(RenderError::Degenerate("tensor has no filters"));
        }
        let shape = fixed.unwrap_or_else(|| Self::square_for(count));
        if shape.capacity() < count {
            return Err(RenderError::shape(
                "filter grid",
                format!("at most {} filters for a {}x{} grid", shape.capacity(), shape.rows, shape.cols),
                format!("{count} filters"),
            ));
        }
        Ok(shape)
    }
}
