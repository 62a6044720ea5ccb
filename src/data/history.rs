//! Training History Module
//! Per-epoch metric values recorded by a training run.

use crate::error::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Metrics drawn by the training curves chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Accuracy,
    ValidationAccuracy,
    Loss,
    ValidationLoss,
}

impl Metric {
    /// Canonical name first, then accepted aliases.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Metric::Accuracy => &["accuracy", "acc"],
            Metric::ValidationAccuracy => &["validation_accuracy", "val_accuracy", "val_acc"],
            Metric::Loss => &["loss"],
            Metric::ValidationLoss => &["validation_loss", "val_loss"],
        }
    }

    pub fn name(self) -> &'static str {
        self.names()[0]
    }
}

/// Mapping from metric name to its per-epoch values.
///
/// Deserializes from the plain JSON object most training loops dump, e.g.
/// `{"loss": [0.9, 0.7], "val_loss": [1.0, 0.8]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingHistory {
    metrics: BTreeMap<String, Vec<f64>>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.metrics.insert(name.into(), values);
    }

    /// Values recorded under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(Vec::as_slice)
    }

    /// Values for `metric` under its canonical name or any alias.
    pub fn metric(&self, metric: Metric) -> RenderResult<&[f64]> {
        metric
            .names()
            .iter()
            .find_map(|name| self.get(name))
            .ok_or_else(|| RenderError::MissingMetric(metric.name().to_string()))
    }

    /// Train and validation series for one panel, checked for equal length.
    pub fn paired(&self, train: Metric, validation: Metric) -> RenderResult<(&[f64], &[f64])> {
        let train_values = self.metric(train)?;
        let validation_values = self.metric(validation)?;

        if train_values.len() != validation_values.len() {
            return Err(RenderError::shape(
                "training history",
                format!(
                    "'{}' with {} epochs to match '{}'",
                    validation.name(),
                    train_values.len(),
                    train.name()
                ),
                format!("{} epochs", validation_values.len()),
            ));
        }
        if train_values.is_empty() {
            return Err(RenderError::Degenerate("training history has no epochs"));
        }
        if train_values
            .iter()
            .chain(validation_values)
            .any(|v| !v.is_finite())
        {
            return Err(RenderError::NonFinite {
                what: "training history",
            });
        }

        Ok((train_values, validation_values))
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a history dumped as a JSON object of metric arrays.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<f64>)> for TrainingHistory {
    fn from_iter<I: IntoIterator<Item = (K, Vec<f64>)>>(iter: I) -> Self {
        Self {
            metrics: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keras_history() -> TrainingHistory {
        TrainingHistory::from_json(
            r#"{"acc": [0.5, 0.6], "val_acc": [0.4, 0.55], "loss": [0.9, 0.7], "val_loss": [1.0, 0.8]}"#,
        )
        .unwrap()
    }

    #[test]
    fn aliases_resolve_to_metrics() {
        let history = keras_history();
        assert_eq!(history.metric(Metric::Accuracy).unwrap(), &[0.5, 0.6]);
        assert_eq!(history.metric(Metric::ValidationAccuracy).unwrap(), &[0.4, 0.55]);
        assert_eq!(history.metric(Metric::ValidationLoss).unwrap(), &[1.0, 0.8]);
    }

    #[test]
    fn canonical_name_wins_over_alias() {
        let history = keras_history().with("accuracy", vec![0.7, 0.8]);
        assert_eq!(history.metric(Metric::Accuracy).unwrap(), &[0.7, 0.8]);
    }

    #[test]
    fn missing_metric_is_reported_by_name() {
        let history: TrainingHistory = [("loss", vec![1.0])].into_iter().collect();
        let err = history.metric(Metric::ValidationLoss).unwrap_err();
        assert_eq!(err.to_string(), "training history has no 'validation_loss' metric");
    }

    #[test]
    fn paired_series_must_have_equal_length() {
        let history = TrainingHistory::new()
            .with("loss", vec![0.9, 0.7, 0.6])
            .with("val_loss", vec![1.0, 0.8]);
        let err = history.paired(Metric::Loss, Metric::ValidationLoss).unwrap_err();
        assert!(matches!(err, RenderError::Shape { .. }));
    }

    #[test]
    fn empty_series_are_degenerate() {
        let history = TrainingHistory::new()
            .with("loss", vec![])
            .with("val_loss", vec![]);
        let err = history.paired(Metric::Loss, Metric::ValidationLoss).unwrap_err();
        assert!(matches!(err, RenderError::Degenerate(_)));
    }

    #[test]
    fn round_trips_as_plain_object() {
        let history = keras_history();
        let json = serde_json::to_string(&history).unwrap();
        assert!(json.starts_with("{\"acc\""));
        assert_eq!(TrainingHistory::from_json(&json).unwrap(), history);
    }
}
