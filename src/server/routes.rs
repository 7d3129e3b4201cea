use crate::model::Artifacts;
use crate::server::{handlers, types::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(artifacts: Artifacts, metrics: PrometheusHandle) -> Router {
    let state = Arc::new(AppState { artifacts, metrics });

    Router::new()
        .route("/", get(handlers::home))
        .route("/predict", post(handlers::predict))
        .route("/model_info", get(handlers::model_info))
        .route("/features", get(handlers::features))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
