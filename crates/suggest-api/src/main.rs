use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use suggest_api::{routes, AppState, ServerConfig};
use suggest_providers::ModelConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = ServerConfig::from_env();
    let model_config = ModelConfig::from_env().context("model configuration")?;
    let state = AppState::new(server_config.clone(), model_config)?;

    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, routes::app(state)).await?;
    Ok(())
}
