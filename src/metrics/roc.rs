//! ROC Curve Module
//! Receiver operating characteristic and area under the curve.

use crate::error::{RenderError, RenderResult};

/// Points of a ROC curve, ordered by decreasing threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    /// Score threshold at each point; the first is `+inf`.
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    pub fn auc(&self) -> f64 {
        auc(&self.fpr, &self.tpr)
    }
}

/// Compute the ROC curve for binary `labels` (0 or 1) and continuous `scores`.
///
/// One point is produced per distinct score, collinear intermediate points are
/// dropped, and a leading `(0, 0)` point is added.
pub fn roc_curve(labels: &[u8], scores: &[f64]) -> RenderResult<RocCurve> {
    if labels.len() != scores.len() {
        return Err(RenderError::shape(
            "ROC scores",
            format!("{} scores (one per label)", labels.len()),
            format!("{} scores", scores.len()),
        ));
    }
    if labels.is_empty() {
        return Err(RenderError::Degenerate("ROC curve needs at least one sample"));
    }
    if let Some((index, &value)) = labels.iter().enumerate().find(|&(_, &v)| v > 1) {
        return Err(RenderError::InvalidLabel { index, value });
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(RenderError::NonFinite { what: "ROC scores" });
    }

    // Stable descending sort by score
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    // Cumulative counts at the last index of each distinct score
    let mut tps: Vec<f64> = Vec::new();
    let mut fps: Vec<f64> = Vec::new();
    let mut thresholds: Vec<f64> = Vec::new();
    let mut tp = 0.0;
    let mut fp = 0.0;
    for (pos, &idx) in order.iter().enumerate() {
        if labels[idx] == 1 {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        let is_last_of_run = order
            .get(pos + 1)
            .map_or(true, |&next| scores[next] != scores[idx]);
        if is_last_of_run {
            tps.push(tp);
            fps.push(fp);
            thresholds.push(scores[idx]);
        }
    }

    if tp == 0.0 || fp == 0.0 {
        return Err(RenderError::Degenerate(
            "ROC curve needs both positive and negative samples",
        ));
    }

    let keep = non_collinear(&fps, &tps);
    let mut curve = RocCurve {
        fpr: vec![0.0],
        tpr: vec![0.0],
        thresholds: vec![f64::INFINITY],
    };
    for i in keep {
        curve.fpr.push(fps[i] / fp);
        curve.tpr.push(tps[i] / tp);
        curve.thresholds.push(thresholds[i]);
    }

    Ok(curve)
}

/// Indices of points where the curve changes direction, plus both ends.
fn non_collinear(fps: &[f64], tps: &[f64]) -> Vec<usize> {
    let n = fps.len();
    if n <= 2 {
        return (0..n).collect();
    }
    let second_diff = |v: &[f64], i: usize| v[i + 1] - 2.0 * v[i] + v[i - 1];

    let mut keep = vec![0];
    keep.extend((1..n - 1).filter(|&i| second_diff(fps, i) != 0.0 || second_diff(tps, i) != 0.0));
    keep.push(n - 1);
    keep
}

/// Area under a curve using the trapezoidal rule.
pub fn auc(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_separable_scores_give_unit_auc() {
        let curve = roc_curve(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]).unwrap();
        assert!((curve.auc() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_scores_give_zero_auc() {
        let curve = roc_curve(&[1, 1, 0, 0], &[0.1, 0.2, 0.8, 0.9]).unwrap();
        assert!(curve.auc().abs() < 1e-12);
    }

    #[test]
    fn matches_reference_points() {
        let curve = roc_curve(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8]).unwrap();
        assert_eq!(curve.fpr, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
        assert_eq!(curve.tpr, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
        assert_eq!(curve.thresholds[0], f64::INFINITY);
        assert_eq!(&curve.thresholds[1..], &[0.8, 0.4, 0.35, 0.1]);
        assert!((curve.auc() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn identical_scores_collapse_to_diagonal() {
        let curve = roc_curve(&[0, 1, 0, 1], &[0.5; 4]).unwrap();
        assert_eq!(curve.fpr, vec![0.0, 1.0]);
        assert_eq!(curve.tpr, vec![0.0, 1.0]);
        assert!((curve.auc() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_are_dropped() {
        // Three negatives in a row lie on one horizontal segment
        let curve = roc_curve(&[1, 0, 0, 0, 1], &[0.9, 0.8, 0.7, 0.6, 0.5]).unwrap();
        assert_eq!(curve.fpr, vec![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(curve.tpr, vec![0.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn uninformative_scores_are_near_half() {
        let labels: Vec<u8> = (0..100).map(|i| (i % 2) as u8).collect();
        let scores: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
        let auc = roc_curve(&labels, &scores).unwrap().auc();
        assert!((auc - 0.5).abs() < 0.05, "auc = {auc}");
    }

    #[test]
    fn single_class_is_degenerate() {
        let err = roc_curve(&[1, 1, 1], &[0.2, 0.4, 0.6]).unwrap_err();
        assert!(matches!(err, RenderError::Degenerate(_)));
    }

    #[test]
    fn rejects_non_binary_labels() {
        let err = roc_curve(&[0, 2, 1], &[0.2, 0.4, 0.6]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidLabel { index: 1, value: 2 }));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = roc_curve(&[0, 1], &[0.2]).unwrap_err();
        assert!(matches!(err, RenderError::Shape { .. }));
    }
}
