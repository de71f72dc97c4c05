// file: src/server/mod.rs
// description: http server exposing the document processing endpoint
// reference: https://docs.rs/axum

pub mod handlers;
pub mod router;

pub use router::{AppState, build_router};

use crate::config::Config;
use crate::error::{FormatterError, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub async fn serve(config: &Config) -> Result<()> {
    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| FormatterError::Config(format!("Cannot bind {}: {}", address, e)))?;

    info!("Listening on http://{}", address);
    info!("POST /process-document (max upload {} MB)", config.server.max_upload_mb);

    axum::serve(listener, build_router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
