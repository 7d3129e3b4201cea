use crate::error::PredictionError;
use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Estimate, Estimator, EstimatorKind};

/// Output head of a fitted linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearHead {
    Regressor,
    /// Binary logistic regression over `classes`.
    Classifier { classes: [f64; 2] },
}

/// A fitted linear model loaded from its JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub model_type: String,
    #[serde(flatten)]
    pub head: LinearHead,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PredictionError> {
        let path = path.as_ref();
        let invalid = |reason: String| PredictionError::InvalidArtifact {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let model: LinearModel =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        if model.coefficients.is_empty() {
            return Err(invalid("model has no coefficients".to_string()));
        }
        Ok(model)
    }

    fn decision(&self, features: ArrayView2<'_, f32>) -> Result<f64, PredictionError> {
        if features.nrows() != 1 || features.ncols() != self.coefficients.len() {
            return Err(PredictionError::Inference(format!(
                "expected 1x{} features, got {}x{}",
                self.coefficients.len(),
                features.nrows(),
                features.ncols()
            )));
        }

        let row: Array1<f64> = features.row(0).mapv(f64::from);
        let coefficients = Array1::from(self.coefficients.clone());
        Ok(row.dot(&coefficients) + self.intercept)
    }
}

impl Estimator for LinearModel {
    fn kind(&self) -> EstimatorKind {
        match self.head {
            LinearHead::Regressor => EstimatorKind::Regressor,
            LinearHead::Classifier { .. } => EstimatorKind::ProbabilisticClassifier,
        }
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Estimate, PredictionError> {
        let z = self.decision(features)?;
        let estimate = match self.head {
            LinearHead::Regressor => Estimate {
                value: z,
                probabilities: None,
            },
            LinearHead::Classifier { classes } => {
                let p = 1.0 / (1.0 + (-z).exp());
                Estimate {
                    value: if p >= 0.5 { classes[1] } else { classes[0] },
                    probabilities: Some(vec![1.0 - p, p]),
                }
            }
        };
        Ok(estimate)
    }
}
