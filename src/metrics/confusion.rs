//! Confusion Matrix Module
//! Shape validation and row normalization.

use crate::error::{RenderError, RenderResult};
use ndarray::{Array2, ArrayView2, Axis};

/// Check that `matrix` is square with one row per class label.
pub fn validate_confusion_shape(matrix: &ArrayView2<f64>, n_labels: usize) -> RenderResult<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(RenderError::shape(
            "confusion matrix",
            "a square matrix",
            format!("{rows}x{cols}"),
        ));
    }
    if rows != n_labels {
        return Err(RenderError::shape(
            "confusion matrix",
            format!("{n_labels}x{n_labels} (one row per class label)"),
            format!("{rows}x{cols}"),
        ));
    }
    if rows == 0 {
        return Err(RenderError::Degenerate("confusion matrix has no classes"));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(RenderError::NonFinite {
            what: "confusion matrix",
        });
    }
    Ok(())
}

/// Divide each row by its sum so rows add up to one.
///
/// Rows that sum to zero have no observations and are left as zeros.
pub fn normalize_rows(matrix: &ArrayView2<f64>) -> Array2<f64> {
    let mut normalized = matrix.to_owned();
    for (i, mut row) in normalized.axis_iter_mut(Axis(0)).enumerate() {
        let sum = row.sum();
        if sum == 0.0 {
            tracing::warn!("Confusion matrix row {} sums to zero; left unnormalized", i);
            continue;
        }
        row.mapv_inplace(|v| v / sum);
    }
    normalized
}
