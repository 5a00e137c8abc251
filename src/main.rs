mod config;
mod handlers;
mod sidecar;

use anyhow::Context;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    config::Config,
    handlers::{router, RelayContext},
    sidecar::SidecarClient,
};

#[tokio::main]
async fn main() {
    // Initialize tracing with environment-based configuration
    // Default to INFO level if RUST_LOG is not set
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    if let Err(e) = run(config).await {
        error!("Fatal: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting tweet relay on {}", config.address);
    info!(
        "Forwarding to {}/{} via sidecar port {}",
        config.pubsub_name, config.topic_name, config.sidecar_port
    );

    let client =
        SidecarClient::new(config.sidecar_port).context("failed to create sidecar client")?;

    let addr = config.listen_addr();

    let ctx = RelayContext {
        publisher: Arc::new(client),
        pubsub_name: config.pubsub_name,
        topic_name: config.topic_name,
    };

    let app = router(ctx).layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("Tweet relay listening on {addr}");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
