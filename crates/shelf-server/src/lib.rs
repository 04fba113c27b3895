//! HTTP server for Shelf.
//!
//! Serves the repository over plain HTTP: `POST /post` uploads a named
//! file, `GET /download`, `GET /list` and `GET /info` resolve the request's
//! query parameters into a payload, a name list, or per-file attributes.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use endpoint::{endpoints, HealthResponse};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::ShelfServer;
