//! Turns a typed feature record into the numeric matrix an estimator expects.

pub mod tabular;

use crate::error::PredictionError;
use crate::features::FeatureRecord;
use ndarray::Array2;

pub use tabular::{ColumnStep, ColumnTransformer};

/// A fitted, deterministic feature transformer.
pub trait Transformer: Send + Sync {
    /// Produces a `1 x output_width()` matrix.
    fn transform(&self, record: &FeatureRecord) -> Result<Array2<f32>, PredictionError>;

    fn output_width(&self) -> usize;
}
