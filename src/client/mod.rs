//! HTTP client for the prediction service.
//!
//! Every call is one attempt with a single bounded wait. Any transport
//! failure or non-success status is a failed outcome; nothing is retried.

pub mod form;
pub mod render;

use crate::features::FeatureRecord;
use crate::server::types::{HealthResponse, ModelInfoResponse, PredictResponse};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub use form::PredictionForm;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const PREDICT_TIMEOUT: Duration = Duration::from_secs(30);
pub const INFO_TIMEOUT: Duration = Duration::from_secs(10);

const PATH_HEALTH: &str = "/";
const PATH_PREDICT: &str = "/predict";
const PATH_MODEL_INFO: &str = "/model_info";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be one of: {choices} (got {value:?})")]
    UnknownChoice {
        field: &'static str,
        value: String,
        choices: String,
    },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Connection Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from service: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct PredictionClient {
    http: HttpClient,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = HttpClient::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one prediction request with a 30 second bound.
    pub async fn predict(&self, record: &FeatureRecord) -> Result<PredictResponse, ClientError> {
        let url = self.url_for(PATH_PREDICT);
        debug!(%url, "sending prediction request");
        let request = self.http.post(&url).json(record).timeout(PREDICT_TIMEOUT);
        Self::read_json(request).await
    }

    pub async fn model_info(&self) -> Result<ModelInfoResponse, ClientError> {
        let request = self
            .http
            .get(self.url_for(PATH_MODEL_INFO))
            .timeout(INFO_TIMEOUT);
        Self::read_json(request).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let request = self.http.get(self.url_for(PATH_HEALTH)).timeout(INFO_TIMEOUT);
        Self::read_json(request).await
    }

    async fn read_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "request rejected by service");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        // A 200 with an unexpected body is the service's fault, not the network's.
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Artifacts;
    use crate::server::routes;
    use crate::test_support::{sample_artifacts, sample_record};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tokio::net::TcpListener;

    async fn spawn_service(artifacts: Artifacts) -> String {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let app = routes::create_router(artifacts, handle);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_predict_round_trip() {
        let base = spawn_service(sample_artifacts()).await;
        let client = PredictionClient::new(base).unwrap();

        let record = sample_record();
        let response = client.predict(&record).await.unwrap();
        assert!(response.prediction.is_finite());
        assert_eq!(response.model_type, "LinearRegression");
        assert_eq!(
            serde_json::Value::Object(response.input_data),
            serde_json::to_value(&record).unwrap()
        );
    }

    #[tokio::test]
    async fn test_server_error_is_failed_outcome() {
        let base = spawn_service(Artifacts::default()).await;
        let client = PredictionClient::new(base).unwrap();

        match client.predict(&sample_record()).await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("error"));
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_model_info_and_health() {
        let base = spawn_service(sample_artifacts()).await;
        let client = PredictionClient::new(base).unwrap();

        let info = client.model_info().await.unwrap();
        assert_eq!(info.features.len(), 8);
        assert!(info.model_loaded);

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PredictionClient::new(format!("http://{addr}")).unwrap();
        let err = client.predict(&sample_record()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().starts_with("Connection Error"));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_decode_error() {
        let app = axum::Router::new().route("/", axum::routing::get(|| async { "OK" }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = PredictionClient::new(format!("http://{addr}")).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(err.to_string().starts_with("Invalid response from service"));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = PredictionClient::new("http://localhost:5000///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url_for(PATH_PREDICT), "http://localhost:5000/predict");
    }
}
