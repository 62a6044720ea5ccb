//! Render one of every chart into a directory.
//!
//! ```text
//! cargo run --example render_all -- out/ [history.json] [style.json]
//! ```

use anyhow::{Context, Result};
use ndarray::{array, Array};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use training_plots::{
    ChartRenderer, ConfusionOptions, FilterGridOptions, GridShape, LineChartLabels, RenderStyle,
    TrainingHistory,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "charts".to_string()));
    let history_path = args.next();
    let style_path = args.next();

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let style = match style_path {
        Some(path) => RenderStyle::from_json_file(&path)
            .with_context(|| format!("loading style from {path}"))?,
        None => RenderStyle::default(),
    };
    let renderer = ChartRenderer::new(style);

    let history = match history_path {
        Some(path) => TrainingHistory::from_json_file(&path)
            .with_context(|| format!("loading history from {path}"))?,
        None => synthetic_history(12),
    };
    renderer.render_training_curves(&history, out_dir.join("training.png"))?;

    let labels = LineChartLabels::new("Epoch", "Error", "Train vs test error", ["train", "test"]);
    let train: Vec<f64> = (0..20).map(|i| 1.0 / (1.0 + i as f64)).collect();
    let test: Vec<f64> = train.iter().map(|v| v * 1.2 + 0.05).collect();
    renderer.render_line_comparison(&train, &test, &labels, out_dir.join("errors.png"))?;

    let cm = array![[50.0, 2.0, 0.0], [3.0, 40.0, 7.0], [0.0, 5.0, 45.0]];
    let classes = ["cat", "dog", "bird"];
    renderer.render_confusion_matrix(
        cm.view(),
        &classes,
        out_dir.join("confusion.png"),
        &ConfusionOptions::default(),
    )?;
    renderer.render_confusion_matrix(
        cm.view(),
        &classes,
        out_dir.join("confusion_normalized.png"),
        &ConfusionOptions::normalized(),
    )?;

    let labels: Vec<u8> = (0..40).map(|i| (i % 3 == 0) as u8).collect();
    let scores: Vec<f64> = labels
        .iter()
        .enumerate()
        .map(|(i, &l)| 0.35 * l as f64 + (i as f64 * 0.37).sin().abs() * 0.6)
        .collect();
    let auc = renderer.render_roc(&labels, &scores, out_dir.join("roc.png"))?;
    tracing::info!("Demo ROC AUC: {auc:.3}");

    let weights = Array::from_shape_fn((5, 5, 3, 32), |(r, c, ch, f)| {
        ((r * 5 + c) as f64 * 0.2 + f as f64).sin() + ch as f64 * 0.1
    })
    .into_dyn();
    renderer.render_filter_grid(
        weights.view(),
        out_dir.join("filters.png"),
        &FilterGridOptions::default(),
    )?;
    renderer.render_filter_grid(
        weights.view(),
        out_dir.join("filters_8x4.png"),
        &FilterGridOptions {
            input_channel: 2,
            grid: Some(GridShape::EIGHT_BY_FOUR),
        },
    )?;

    let activations = Array::from_shape_fn((1, 16, 16, 10), |(_, r, c, f)| {
        ((r as f64 - 8.0).powi(2) + (c as f64 - 8.0).powi(2)).sqrt() * (f + 1) as f64
    })
    .into_dyn();
    renderer.render_activation_grid(activations.view(), out_dir.join("activations.png"), None)?;

    let heat = Array::from_shape_fn((24, 32), |(r, c)| (r as f64 * 0.25).sin() * (c as f64 * 0.2).cos());
    renderer.render_heatmap(heat.view(), out_dir.join("heatmap.png"))?;

    tracing::info!("Charts written to {}", out_dir.display());
    Ok(())
}

fn synthetic_history(epochs: usize) -> TrainingHistory {
    let curve = |start: f64, end: f64, rate: f64| -> Vec<f64> {
        (0..epochs)
            .map(|e| end + (start - end) * (-rate * e as f64).exp())
            .collect()
    };
    TrainingHistory::new()
        .with("accuracy", curve(0.4, 0.95, 0.35))
        .with("val_accuracy", curve(0.35, 0.88, 0.3))
        .with("loss", curve(1.6, 0.15, 0.35))
        .with("val_loss", curve(1.7, 0.35, 0.3))
}
