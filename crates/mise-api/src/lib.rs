//! mise-api - HTTP API server for the mise recipe backend.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;

use mise_db::Database;

pub use config::{Config, StorageBackend};
pub use error::ApiError;
pub use routes::{router, ROUTES};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
