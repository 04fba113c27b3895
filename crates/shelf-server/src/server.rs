use std::sync::Arc;

use shelf_sdk::Shelf;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Shelf HTTP server.
///
/// Owns the repository for the lifetime of the process; handlers reach it
/// through router state.
pub struct ShelfServer {
    config: ServerConfig,
    shelf: Arc<Shelf>,
}

impl ShelfServer {
    /// A server over a fresh in-memory repository.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_shelf(config, Arc::new(Shelf::new()))
    }

    pub fn with_shelf(config: ServerConfig, shelf: Arc<Shelf>) -> Self {
        Self { config, shelf }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn shelf(&self) -> &Arc<Shelf> {
        &self.shelf
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.shelf), &self.config)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener until Ctrl-C.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        let app = self.router();
        tracing::info!("Shelf server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
