//! Application state for the HTTP server.

use std::sync::Arc;

use crate::auth::TokenSigner;
use crate::config::AppConfig;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Issues and verifies bearer tokens
    pub tokens: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>, tokens: TokenSigner) -> Self {
        Self {
            repository,
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_config(repository: Arc<dyn FullRepository>, config: &AppConfig) -> Self {
        Self::new(
            repository,
            TokenSigner::new(config.jwt_secret.as_bytes(), config.token_ttl),
        )
    }
}
