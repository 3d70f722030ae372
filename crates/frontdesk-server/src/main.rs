//! # frontdesk-server
//!
//! Backend for the patient-concern tracking dashboard.
//!
//! This binary provides:
//! - **REST API** (axum) for concerns, call documentation, staff chat, and
//!   image attachments
//! - **In-memory storage** of all records for the lifetime of the process
//! - **Content store** holding uploaded image bytes on disk under generated,
//!   traversal-safe names

mod api;
mod config;
mod content_store;
mod error;
mod upload;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use frontdesk_store::Store;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::content_store::ContentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,frontdesk_server=debug")),
        )
        .init();

    info!("Starting frontdesk server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------

    // Content store (creates the upload directory if missing)
    let content_store = Arc::new(ContentStore::new(config.upload_dir.clone()).await?);

    // In-memory record store, constructed once and threaded through state
    let store = Store::new();

    let http_addr = config.http_addr;
    let app_state = AppState {
        store,
        content_store,
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
