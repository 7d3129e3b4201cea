use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ndarray::ShapeError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Artifact not found at path: {0}")]
    ArtifactNotFound(String),

    #[error("Invalid artifact {path}: {reason}")]
    InvalidArtifact { path: String, reason: String },

    #[error("Model or preprocessor not loaded. Please check server logs.")]
    NotLoaded,

    #[error("No JSON data provided")]
    EmptyBody,

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("Missing required features: {0:?}")]
    MissingFeatures(Vec<String>),

    #[error("Invalid value for {feature}: expected {expected}")]
    InvalidFeature {
        feature: String,
        expected: &'static str,
    },

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Shape error: {0}")]
    ShapeError(#[from] ShapeError),

    #[error("Inference error: {0}")]
    Inference(String),
}

impl PredictionError {
    /// True for failures raised while transforming or predicting.
    pub fn is_inference_failure(&self) -> bool {
        matches!(
            self,
            PredictionError::Transform(_)
                | PredictionError::ShapeError(_)
                | PredictionError::Inference(_)
        )
    }
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        match self {
            PredictionError::MissingFeatures(ref missing) => {
                let body = Json(json!({
                    "error": self.to_string(),
                    "required_features": missing,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ref e if e.is_inference_failure() => {
                // Detail stays in the server log; the caller only sees the category.
                error!(error = %e, "prediction failed");
                let body = Json(json!({
                    "error": "Prediction failed",
                    "code": "inference_failed",
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            _ => {}
        }

        let status = match self {
            PredictionError::EmptyBody
            | PredictionError::MalformedBody(_)
            | PredictionError::InvalidFeature { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_artifact_not_found_error() {
        let error = PredictionError::ArtifactNotFound("superkart_model.onnx".to_string());
        assert_eq!(
            error.to_string(),
            "Artifact not found at path: superkart_model.onnx"
        );
    }

    #[test]
    fn test_invalid_feature_error() {
        let error = PredictionError::InvalidFeature {
            feature: "Product_MRP".to_string(),
            expected: "a number",
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for Product_MRP: expected a number"
        );
    }

    #[test]
    fn test_shape_error_conversion() {
        let shape_error = ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape);
        let error = PredictionError::from(shape_error);
        assert!(matches!(error, PredictionError::ShapeError(_)));
        assert!(error.is_inference_failure());
    }

    #[tokio::test]
    async fn test_missing_features_response_names_fields() {
        let error = PredictionError::MissingFeatures(vec![
            "Store_Size".to_string(),
            "Store_Type".to_string(),
        ]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["required_features"], json!(["Store_Size", "Store_Type"]));
        assert!(body["error"].as_str().unwrap().contains("Store_Size"));
    }

    #[tokio::test]
    async fn test_inference_failure_is_opaque() {
        let error = PredictionError::Inference("matrix 1x3 vs 5 coefficients".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "inference_failed");
        assert!(!body.to_string().contains("coefficients"));
    }

    #[tokio::test]
    async fn test_not_loaded_is_server_error() {
        let response = PredictionError::NotLoaded.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["error"].is_string());
    }

    #[test]
    fn test_bad_body_is_client_error() {
        let response = PredictionError::EmptyBody.into_response();
        assert!(response.status().is_client_error());

        let response = PredictionError::MalformedBody("expected value".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
