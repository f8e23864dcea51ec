//! Configuración de cache
//!
//! Este módulo contiene la configuración para el sistema de cache.

use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    /// TTL de respaldo cuando el caller no indica uno (bucket temporal)
    pub default_ttl: u64,
    /// Timeout por comando contra Redis. Tiene que ser corto: un Redis
    /// colgado degrada a "cache miss", no bloquea el request.
    pub command_timeout_ms: u64,
    /// Máximo de claves incluidas como muestra en las estadísticas
    pub stats_sample_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            default_ttl: 60, // 1 minuto
            command_timeout_ms: 500,
            stats_sample_size: 10,
        }
    }
}
