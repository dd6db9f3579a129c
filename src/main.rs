use anyhow::Result;
use content_pipeline::config::Config;
use content_pipeline::pipeline::TranslationPipeline;
use content_pipeline::server::{build_router, AppState};
use content_pipeline::store::{BlobStore, ContentStore};
use content_pipeline::translation::{OpenAiClient, TextGenerator, TranslationEngine};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_pipeline=info".parse()?),
        )
        .init();

    info!("Starting content pipeline server");

    let config = Config::from_env()?;
    info!(?config, "Configuration loaded");

    // Missing credentials are reported per request, not at start-up
    if config.blob_read_write_token.is_none() {
        warn!("BLOB_READ_WRITE_TOKEN is not set, translation requests will fail");
    }
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, translation requests will fail");
    }

    let client = reqwest::Client::new();
    let store: Arc<dyn ContentStore> = Arc::new(BlobStore::from_config(client.clone(), &config));
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::from_config(client, &config));
    let engine = TranslationEngine::new(generator);

    let state = AppState {
        pipeline: Arc::new(TranslationPipeline::new(store, engine)),
    };
    let app = build_router(state);

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}
