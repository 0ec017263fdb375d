use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haven_gateway=info,tower_http=debug".into()),
        )
        .init();

    let config = haven_core::config::HavenConfig::load(None)?;

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    let provider = haven_agent::openai::OpenAiProvider::new(
        config.provider.api_key.clone(),
        config.provider.base_url.clone(),
    );
    info!(model = %config.provider.model, base_url = %config.provider.base_url, "provider configured");

    let generator = haven_agent::ResponseGenerator::new(
        Box::new(provider),
        &config.provider,
        &config.bot,
        &config.crisis,
    );
    let pipeline = haven_agent::MessagePipeline::new(
        haven_store::ConversationStore::new(),
        haven_crisis::CrisisDetector::default(),
        generator,
        config.crisis.clone(),
    );

    let state = Arc::new(app::AppState::new(config, pipeline));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    info!(%addr, "haven gateway listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("ctrl-c received, shutting down");
}
