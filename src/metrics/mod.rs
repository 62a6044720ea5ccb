//! Metrics module - Computations behind the evaluation charts

mod confusion;
mod roc;

pub use confusion::{normalize_rows, validate_confusion_shape};
pub use roc::{auc, roc_curve, RocCurve};

/// Finite minimum and maximum of `values`, or `None` if there are none.
pub fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
