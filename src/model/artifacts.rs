use crate::config::ArtifactConfig;
use crate::error::PredictionError;
use crate::features::FeatureRecord;
use crate::model::{loader, Estimate, Estimator};
use crate::preprocessing::Transformer;
use std::sync::Arc;
use tracing::{error, warn};

/// The fitted transformer and estimator, loaded once at startup.
///
/// Either half may be absent; the service keeps running and reports itself
/// unhealthy instead. Nothing here is mutated after construction, so a clone
/// is shared by every request handler.
#[derive(Clone, Default)]
pub struct Artifacts {
    transformer: Option<Arc<dyn Transformer>>,
    estimator: Option<Arc<dyn Estimator>>,
}

impl Artifacts {
    pub fn new(
        transformer: Option<Arc<dyn Transformer>>,
        estimator: Option<Arc<dyn Estimator>>,
    ) -> Self {
        Self {
            transformer,
            estimator,
        }
    }

    /// Loads both artifacts, logging and skipping any that fail.
    pub fn load(config: &ArtifactConfig) -> Self {
        let estimator = match loader::load_estimator(&config.model_path) {
            Ok(estimator) => Some(estimator),
            Err(PredictionError::ArtifactNotFound(path)) => {
                warn!(%path, "Model file not found. Please train and save the model first.");
                None
            }
            Err(e) => {
                error!(error = %e, "failed to load model");
                None
            }
        };

        let transformer = match loader::load_transformer(&config.preprocessor_path) {
            Ok(transformer) => Some(transformer),
            Err(PredictionError::ArtifactNotFound(path)) => {
                warn!(%path, "Preprocessor file not found.");
                None
            }
            Err(e) => {
                error!(error = %e, "failed to load preprocessor");
                None
            }
        };

        if let (Some(t), Some(Some(width))) = (
            transformer.as_ref(),
            estimator.as_ref().map(|e| e.input_width()),
        ) {
            if t.output_width() != width {
                warn!(
                    preprocessor_width = t.output_width(),
                    model_width = width,
                    "preprocessor output does not match model input; predictions will fail"
                );
            }
        }

        Self::new(transformer, estimator)
    }

    pub fn model_loaded(&self) -> bool {
        self.estimator.is_some()
    }

    pub fn preprocessor_loaded(&self) -> bool {
        self.transformer.is_some()
    }

    pub fn model_type(&self) -> Option<&str> {
        self.estimator.as_deref().map(|e| e.model_type())
    }

    /// Transform then predict a single record.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Estimate, PredictionError> {
        let (transformer, estimator) = match (&self.transformer, &self.estimator) {
            (Some(t), Some(e)) => (t, e),
            _ => return Err(PredictionError::NotLoaded),
        };

        let features = transformer.transform(record)?;
        let estimate = estimator.predict(features.view())?;
        if !estimate.value.is_finite() {
            return Err(PredictionError::Inference(format!(
                "non-finite prediction {}",
                estimate.value
            )));
        }
        Ok(estimate)
    }
}
