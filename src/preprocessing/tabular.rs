use crate::error::PredictionError;
use crate::features::{FeatureRecord, FeatureValue, FEATURE_NAMES};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Transformer;

/// One fitted column step. Output columns follow step order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStep {
    StandardScaler {
        column: String,
        mean: f64,
        scale: f64,
    },
    OneHot {
        column: String,
        categories: Vec<String>,
    },
    Passthrough {
        column: String,
    },
}

impl ColumnStep {
    pub fn column(&self) -> &str {
        match self {
            ColumnStep::StandardScaler { column, .. }
            | ColumnStep::OneHot { column, .. }
            | ColumnStep::Passthrough { column } => column,
        }
    }

    fn width(&self) -> usize {
        match self {
            ColumnStep::OneHot { categories, .. } => categories.len(),
            _ => 1,
        }
    }

    fn encode(&self, value: FeatureValue<'_>, out: &mut Vec<f32>) -> Result<(), PredictionError> {
        match (self, value) {
            (ColumnStep::StandardScaler { mean, scale, .. }, FeatureValue::Number(x)) => {
                // sklearn leaves zero-variance columns unscaled
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                out.push(((x - mean) / scale) as f32);
            }
            (ColumnStep::Passthrough { .. }, FeatureValue::Number(x)) => out.push(x as f32),
            (ColumnStep::OneHot { categories, .. }, FeatureValue::Category(v)) => {
                // Unknown categories encode to all zeros.
                out.extend(categories.iter().map(|c| if c == v { 1.0 } else { 0.0 }));
            }
            (step, _) => {
                return Err(PredictionError::Transform(format!(
                    "column {} has the wrong type for this step",
                    step.column()
                )))
            }
        }
        Ok(())
    }
}

/// A fitted column transformer loaded from its JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    pub steps: Vec<ColumnStep>,
}

impl ColumnTransformer {
    pub fn new(steps: Vec<ColumnStep>) -> Result<Self, String> {
        if steps.is_empty() {
            return Err("transformer has no steps".to_string());
        }
        if let Some(step) = steps
            .iter()
            .find(|s| !FEATURE_NAMES.contains(&s.column()))
        {
            return Err(format!("unknown input column {}", step.column()));
        }
        Ok(Self { steps })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PredictionError> {
        let path = path.as_ref();
        let invalid = |reason: String| PredictionError::InvalidArtifact {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let parsed: ColumnTransformer =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        Self::new(parsed.steps).map_err(invalid)
    }
}

impl Transformer for ColumnTransformer {
    fn transform(&self, record: &FeatureRecord) -> Result<Array2<f32>, PredictionError> {
        let mut row = Vec::with_capacity(self.output_width());
        for step in &self.steps {
            let value = record.get(step.column()).ok_or_else(|| {
                PredictionError::Transform(format!("unknown column {}", step.column()))
            })?;
            step.encode(value, &mut row)?;
        }

        let width = row.len();
        Ok(Array2::from_shape_vec((1, width), row)?)
    }

    fn output_width(&self) -> usize {
        self.steps.iter().map(ColumnStep::width).sum()
    }
}
