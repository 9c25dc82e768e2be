use anyhow::Result;
use std::net::SocketAddr;

use salat_assistant::AssistantService;
use salat_assistant::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::load();

    let service = AssistantService::new(&config)?;

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .expect("Invalid SALAT_HTTP_BIND (expected host:port)");

    // API routes plus a plain liveness endpoint for probes
    let router = service
        .router()
        .route("/health", axum::routing::get(|| async { "ok" }));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        %bind,
        name = %config.server.name,
        version = %config.server.version,
        "Starting prayer assistant HTTP server"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
