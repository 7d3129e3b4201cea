use crate::error::PredictionError;
use ndarray::ArrayView2;
use ort::session::Session;
use ort::value::Tensor;
use std::sync::Mutex;

use super::{Estimate, Estimator, EstimatorKind};

/// An estimator exported to ONNX, e.g. by skl2onnx.
///
/// Takes one `f32` input of shape `[1, n]`. A single output is read as a
/// regression value; two outputs are read as `(label, probabilities)`.
/// Classifiers must be exported with `zipmap=False` so the probabilities
/// arrive as a plain `[batch, classes]` tensor.
pub struct OnnxEstimator {
    // `Session::run` needs `&mut`, so calls are serialized here.
    session: Mutex<Session>,
    input_name: String,
    input_width: Option<usize>,
    kind: EstimatorKind,
    model_type: String,
}

/// Last dimension of a declared tensor shape, if it is static.
fn static_width(dims: &[i64]) -> Option<usize> {
    dims.last()
        .copied()
        .filter(|&d| d > 0)
        .map(|d| d as usize)
}

impl OnnxEstimator {
    pub fn new(session: Session, model_type: impl Into<String>) -> Result<Self, PredictionError> {
        let input = session
            .inputs
            .first()
            .ok_or_else(|| PredictionError::Inference("model declares no inputs".to_string()))?;
        let input_name = input.name.clone();
        let input_width = input
            .input_type
            .tensor_shape()
            .and_then(|shape| static_width(shape));

        let kind = match session.outputs.len() {
            0 => {
                return Err(PredictionError::Inference(
                    "model declares no outputs".to_string(),
                ))
            }
            1 => EstimatorKind::Regressor,
            _ => EstimatorKind::ProbabilisticClassifier,
        };

        // A ZipMap output is a sequence of maps, not a tensor.
        if let Some(output) = session
            .outputs
            .iter()
            .take(2)
            .find(|output| output.output_type.tensor_shape().is_none())
        {
            return Err(PredictionError::Inference(format!(
                "output {} is not a tensor; export classifiers with zipmap=False",
                output.name
            )));
        }

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            input_width,
            kind,
            model_type: model_type.into(),
        })
    }
}

fn runtime_error(e: impl std::fmt::Display) -> PredictionError {
    PredictionError::Inference(e.to_string())
}

impl Estimator for OnnxEstimator {
    fn kind(&self) -> EstimatorKind {
        self.kind
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn input_width(&self) -> Option<usize> {
        self.input_width
    }

    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Estimate, PredictionError> {
        let shape = [features.nrows(), features.ncols()];
        let data: Vec<f32> = features.iter().copied().collect();
        let input_value = Tensor::from_array((shape, data)).map_err(runtime_error)?;

        let mut session_guard = self
            .session
            .lock()
            .map_err(|_| PredictionError::Inference("session lock poisoned".to_string()))?;
        let outputs = session_guard
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .map_err(runtime_error)?;

        match self.kind {
            EstimatorKind::Regressor => {
                let (_, values) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .map_err(runtime_error)?;
                let value = values
                    .first()
                    .copied()
                    .ok_or_else(|| PredictionError::Inference("empty model output".to_string()))?;
                Ok(Estimate {
                    value: f64::from(value),
                    probabilities: None,
                })
            }
            EstimatorKind::ProbabilisticClassifier => {
                let (_, labels) = outputs[0]
                    .try_extract_tensor::<i64>()
                    .map_err(runtime_error)?;
                let label = labels
                    .first()
                    .copied()
                    .ok_or_else(|| PredictionError::Inference("empty label output".to_string()))?;

                let (shape, probabilities) = outputs[1]
                    .try_extract_tensor::<f32>()
                    .map_err(runtime_error)?;
                // First row of a [batch, classes] tensor.
                let classes = shape.last().copied().unwrap_or(0).max(0) as usize;
                let probabilities = probabilities
                    .iter()
                    .take(classes)
                    .map(|&p| f64::from(p))
                    .collect();

                Ok(Estimate {
                    value: label as f64,
                    probabilities: Some(probabilities),
                })
            }
        }
    }
}
