use superkart::{config, model, observability, server};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Init
    observability::init_tracing();
    if let Err(e) = model::loader::init_ort() {
        warn!(error = %e, "ONNX Runtime unavailable; .onnx models will not load");
    }

    // 2. Load Config
    let config = config::AppConfig::load()?;

    // 3. Load artifacts once; failures leave the service running but unhealthy
    let artifacts = model::Artifacts::load(&config.artifacts);
    info!(
        model_loaded = artifacts.model_loaded(),
        preprocessor_loaded = artifacts.preprocessor_loaded(),
        model_type = artifacts.model_type().unwrap_or("Not loaded"),
        "artifacts initialised"
    );

    // 4. Create Router
    let metrics = observability::install_metrics()?;
    let app = server::routes::create_router(artifacts, metrics);

    // 5. Bind & Serve
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
