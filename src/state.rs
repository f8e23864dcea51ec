//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El cache se construye una vez en el
//! arranque y se clona barato (por dentro es un Arc al store).

use sqlx::PgPool;

use crate::cache::ContentCache;
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub cache: ContentCache,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, cache: ContentCache) -> Self {
        Self { pool, config, cache }
    }
}
