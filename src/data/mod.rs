//! Data module - Training histories and tensors

mod history;
mod tensor;

pub use history::{Metric, TrainingHistory};
pub use tensor::{Activations, FilterWeights};
