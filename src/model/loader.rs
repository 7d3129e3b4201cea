use crate::error::PredictionError;
use crate::model::linear::LinearModel;
use crate::model::onnx::OnnxEstimator;
use crate::model::Estimator;
use crate::preprocessing::{ColumnTransformer, Transformer};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

// Initialize the global environment for ORT (only needed once)
pub fn init_ort() -> Result<(), PredictionError> {
    ort::init()
        .with_name("superkart")
        .commit()
        .map_err(|e| PredictionError::Inference(e.to_string()))?;
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<(), PredictionError> {
    if !path.exists() {
        return Err(PredictionError::ArtifactNotFound(path.display().to_string()));
    }
    Ok(())
}

fn invalid(path: &Path, reason: impl std::fmt::Display) -> PredictionError {
    PredictionError::InvalidArtifact {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Loads an ONNX model from disk and creates an inference session.
pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, PredictionError> {
    let path = model_path.as_ref();
    ensure_exists(path)?;

    let session = Session::builder()
        .map_err(|e| invalid(path, e))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| invalid(path, e))?
        .with_intra_threads(1)
        .map_err(|e| invalid(path, e))?
        .commit_from_file(path)
        .map_err(|e| invalid(path, e))?;

    for (i, input) in session.inputs.iter().enumerate() {
        info!(model = %path.display(), index = i, name = %input.name, "model input");
    }

    Ok(session)
}

/// Loads the fitted transformer artifact.
pub fn load_transformer(path: impl AsRef<Path>) -> Result<Arc<dyn Transformer>, PredictionError> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let transformer = ColumnTransformer::from_json_file(path)?;
    info!(path = %path.display(), width = transformer.output_width(), "preprocessor loaded");
    Ok(Arc::new(transformer))
}

/// Loads the fitted estimator artifact; the format follows the file extension.
pub fn load_estimator(path: impl AsRef<Path>) -> Result<Arc<dyn Estimator>, PredictionError> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let estimator: Arc<dyn Estimator> = match extension.as_deref() {
        Some("onnx") => {
            let session = load_session(path)?;
            let model_type = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("OnnxModel");
            Arc::new(OnnxEstimator::new(session, model_type).map_err(|e| invalid(path, e))?)
        }
        Some("json") => Arc::new(LinearModel::from_json_file(path)?),
        _ => return Err(invalid(path, "unsupported model format (expected .onnx or .json)")),
    };

    info!(
        path = %path.display(),
        model_type = estimator.model_type(),
        kind = ?estimator.kind(),
        "model loaded"
    );
    Ok(estimator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EstimatorKind;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_estimator_nonexistent_file() {
        let result = load_estimator("nonexistent_model.onnx");
        match result {
            Err(PredictionError::ArtifactNotFound(path)) => {
                assert_eq!(path, "nonexistent_model.onnx")
            }
            _ => panic!("Expected ArtifactNotFound error"),
        }
    }

    #[test]
    fn test_load_transformer_nonexistent_file() {
        let result = load_transformer("nonexistent_preprocessor.json");
        assert!(matches!(result, Err(PredictionError::ArtifactNotFound(_))));
    }

    #[test]
    fn test_load_session_rejects_garbage() {
        let mut temp_file = Builder::new().suffix(".onnx").tempfile().unwrap();
        write!(temp_file, "definitely not a protobuf").unwrap();

        // Either ORT rejects the bytes or the runtime itself is unavailable;
        // both must surface as an invalid artifact, never a panic.
        let result = load_estimator(temp_file.path());
        assert!(matches!(result, Err(PredictionError::InvalidArtifact { .. })));
    }

    #[test]
    fn test_load_json_estimator() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            temp_file,
            r#"{{"model_type":"LogisticRegression","kind":"classifier","classes":[0.0,1.0],"coefficients":[0.5,0.5],"intercept":-1.0}}"#
        )
        .unwrap();

        let estimator = load_estimator(temp_file.path()).unwrap();
        assert_eq!(estimator.model_type(), "LogisticRegression");
        assert_eq!(estimator.kind(), EstimatorKind::ProbabilisticClassifier);
    }

    #[test]
    fn test_unknown_extension_is_invalid() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = load_estimator(temp_file.path());
        assert!(matches!(result, Err(PredictionError::InvalidArtifact { .. })));
    }
}
