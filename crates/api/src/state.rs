use std::sync::Arc;

use gestion_db::DbPool;

use crate::auth::jwt::JwtConfig;
use crate::config::ServerConfig;

/// Handler state: the Postgres pool plus the loaded configuration.
///
/// Cloned per request by axum; the pool is reference-counted internally and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Signing settings for access and refresh tokens.
    pub fn jwt(&self) -> &JwtConfig {
        &self.config.jwt
    }
}
