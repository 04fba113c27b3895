use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use shelf_sdk::Shelf;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::endpoint::endpoints;
use crate::handler;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub shelf: Arc<Shelf>,
}

/// Build the axum router with all Shelf endpoints.
pub fn build_router(shelf: Arc<Shelf>, config: &ServerConfig) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(handler::index_handler))
        .route(endpoints::POST, post(handler::post_handler))
        .route(endpoints::DOWNLOAD, get(handler::download_handler))
        .route(endpoints::LIST, get(handler::list_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { shelf })
}
