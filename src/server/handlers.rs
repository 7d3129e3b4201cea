use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use metrics::{counter, histogram};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::PredictionError;
use crate::features::{FeatureRecord, FEATURE_DESCRIPTIONS, FEATURE_NAMES};
use crate::server::types::*;

pub const SERVICE_NAME: &str = "SuperKart Sales Prediction API";

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn feature_list() -> Vec<String> {
    FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
}

pub async fn home(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model_loaded = state.artifacts.model_loaded();
    let preprocessor_loaded = state.artifacts.preprocessor_loaded();
    let status = if model_loaded && preprocessor_loaded {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        message: SERVICE_NAME.to_string(),
        status: status.to_string(),
        timestamp: timestamp(),
        model_loaded,
        preprocessor_loaded,
    })
}

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, PredictionError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PredictionError::EmptyBody);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(data)) => Ok(data),
        Ok(Value::Null) => Err(PredictionError::EmptyBody),
        Ok(_) => Err(PredictionError::MalformedBody(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(PredictionError::MalformedBody(e.to_string())),
    }
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, PredictionError> {
    let start = Instant::now();
    let result = run_prediction(&state, &body);
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.is_inference_failure() => "inference_failed",
        Err(PredictionError::NotLoaded) => "not_loaded",
        Err(_) => "rejected",
    };
    counter!("predictions_total", "outcome" => outcome).increment(1);
    histogram!("prediction_latency_seconds").record(start.elapsed().as_secs_f64());
    result.map(Json)
}

fn run_prediction(state: &AppState, body: &[u8]) -> Result<PredictResponse, PredictionError> {
    // 1. Both artifacts must be present
    let model_type = match state.artifacts.model_type() {
        Some(model_type) if state.artifacts.preprocessor_loaded() => model_type.to_string(),
        _ => return Err(PredictionError::NotLoaded),
    };

    // 2. Validate body and required features
    let data = parse_body(body)?;
    let record = FeatureRecord::from_json(&data)?;
    debug!(?record, "prediction request");

    // 3. Transform + predict
    let estimate = state.artifacts.predict(&record)?;
    info!(prediction = estimate.value, %model_type, "prediction served");

    Ok(PredictResponse {
        prediction: estimate.value,
        input_data: data,
        timestamp: timestamp(),
        model_type,
        prediction_probabilities: estimate.probabilities,
    })
}

pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        model_type: state
            .artifacts
            .model_type()
            .unwrap_or("Not loaded")
            .to_string(),
        features: feature_list(),
        model_loaded: state.artifacts.model_loaded(),
        preprocessor_loaded: state.artifacts.preprocessor_loaded(),
        timestamp: timestamp(),
    })
}

pub async fn features() -> Json<FeaturesResponse> {
    Json(FeaturesResponse {
        required_features: feature_list(),
        feature_descriptions: FEATURE_DESCRIPTIONS
            .iter()
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect(),
    })
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
