use crate::model::Artifacts;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Shared Application State
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Artifacts,
    pub metrics: PrometheusHandle,
}

// --- DTOs (Data Transfer Objects) ---
// Deserialize is derived too so the client can read them back.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    pub timestamp: String,
    pub model_loaded: bool,
    pub preprocessor_loaded: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictResponse {
    pub prediction: f64,
    /// The request body exactly as received.
    pub input_data: Map<String, Value>,
    pub timestamp: String,
    pub model_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_probabilities: Option<Vec<f64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelInfoResponse {
    pub model_type: String,
    pub features: Vec<String>,
    pub model_loaded: bool,
    pub preprocessor_loaded: bool,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeaturesResponse {
    pub required_features: Vec<String>,
    pub feature_descriptions: BTreeMap<String, String>,
}
