pub mod artifacts;
pub mod linear;
pub mod loader;
pub mod onnx;

use crate::error::PredictionError;
use ndarray::ArrayView2;

pub use artifacts::Artifacts;

/// What an estimator can produce, fixed when the artifact is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    Regressor,
    ProbabilisticClassifier,
}

/// Output of a single prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub value: f64,
    /// Present only for `ProbabilisticClassifier`.
    pub probabilities: Option<Vec<f64>>,
}

/// A fitted estimator mapping one transformed row to a scalar.
pub trait Estimator: Send + Sync {
    fn kind(&self) -> EstimatorKind;

    /// Label reported to clients as `model_type`.
    fn model_type(&self) -> &str;

    /// Expected feature count, when the artifact declares it.
    fn input_width(&self) -> Option<usize>;

    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Estimate, PredictionError>;
}
