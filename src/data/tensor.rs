//! Tensor Module
//! Slicing convolution weights and activations into per-filter images.

use crate::error::{RenderError, RenderResult};
use ndarray::{s, ArrayView2, ArrayView4, ArrayViewD, Ix4};

/// Convolution weights laid out as `(height, width, input_channel, filter)`.
#[derive(Debug, Clone, Copy)]
pub struct FilterWeights<'a> {
    weights: ArrayView4<'a, f64>,
}

impl<'a> FilterWeights<'a> {
    pub fn new(weights: ArrayViewD<'a, f64>) -> RenderResult<Self> {
        let weights = require_4d(weights, "filter weights", "(height, width, channel, filter)")?;
        Ok(Self { weights })
    }

    pub fn filter_count(&self) -> usize {
        self.weights.dim().3
    }

    pub fn channel_count(&self) -> usize {
        self.weights.dim().2
    }

    /// Image of filter `filter` for `channel`.
    pub fn slice(&self, channel: usize, filter: usize) -> ArrayView2<'a, f64> {
        self.weights.slice_move(s![.., .., channel, filter])
    }

    pub fn check_channel(&self, channel: usize) -> RenderResult<()> {
        if channel >= self.channel_count() {
            return Err(RenderError::shape(
                "filter weights input channel",
                format!("an index below {}", self.channel_count()),
                channel.to_string(),
            ));
        }
        Ok(())
    }

    pub fn values(&self) -> impl Iterator<Item = &f64> {
        self.weights.iter()
    }
}

/// Layer output laid out as `(batch, height, width, filter)`.
#[derive(Debug, Clone, Copy)]
pub struct Activations<'a> {
    values: ArrayView4<'a, f64>,
}

impl<'a> Activations<'a> {
    pub fn new(values: ArrayViewD<'a, f64>) -> RenderResult<Self> {
        let values = require_4d(values, "activations", "(batch, height, width, filter)")?;
        if values.dim().0 == 0 {
            return Err(RenderError::shape(
                "activations batch",
                "at least one sample",
                "an empty batch",
            ));
        }
        Ok(Self { values })
    }

    pub fn filter_count(&self) -> usize {
        self.values.dim().3
    }

    /// Output of `filter` for the first sample in the batch.
    pub fn slice(&self, filter: usize) -> ArrayView2<'a, f64> {
        self.values.slice_move(s![0, .., .., filter])
    }
}

fn require_4d<'a>(
    tensor: ArrayViewD<'a, f64>,
    what: &'static str,
    layout: &str,
) -> RenderResult<ArrayView4<'a, f64>> {
    let shape = format!("{:?}", tensor.shape());
    let ndim = tensor.ndim();
    tensor.into_dimensionality::<Ix4>().map_err(|_| {
        RenderError::shape(
            what,
            format!("a 4D tensor {layout}"),
            format!("{ndim}D shape {shape}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ArrayD, IxDyn};

    #[test]
    fn slices_filter_for_channel() {
        // value encodes (row, col, channel, filter)
        let weights = Array::from_shape_fn((2, 2, 3, 4), |(r, c, ch, f)| {
            (r * 1000 + c * 100 + ch * 10 + f) as f64
        })
        .into_dyn();
        let filters = FilterWeights::new(weights.view()).unwrap();
        assert_eq!(filters.filter_count(), 4);
        assert_eq!(filters.channel_count(), 3);

        let img = filters.slice(2, 3);
        assert_eq!(img.dim(), (2, 2));
        assert_eq!(img[[1, 0]], 1023.0);
    }

    #[test]
    fn rejects_wrong_rank() {
        let weights = ArrayD::<f64>::zeros(IxDyn(&[3, 3, 8]));
        let err = FilterWeights::new(weights.view()).unwrap_err();
        assert!(matches!(err, RenderError::Shape { .. }));
        assert!(err.to_string().contains("3D"));
    }

    #[test]
    fn rejects_channel_out_of_range() {
        let weights = ArrayD::<f64>::zeros(IxDyn(&[3, 3, 1, 8]));
        let filters = FilterWeights::new(weights.view()).unwrap();
        assert!(filters.check_channel(0).is_ok());
        assert!(filters.check_channel(1).is_err());
    }

    #[test]
    fn activations_use_first_sample() {
        let values = Array::from_shape_fn((2, 3, 3, 5), |(b, _, _, f)| (b * 10 + f) as f64).into_dyn();
        let acts = Activations::new(values.view()).unwrap();
        assert_eq!(acts.filter_count(), 5);
        assert!(acts.slice(4).iter().all(|&v| v == 4.0));
    }

    #[test]
    fn activations_need_a_sample() {
        let values = ArrayD::<f64>::zeros(IxDyn(&[0, 3, 3, 5]));
        assert!(Activations::new(values.view()).is_err());
    }
}
