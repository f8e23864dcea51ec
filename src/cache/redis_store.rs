//! Cliente Redis del cache
//!
//! Implementación de `CacheStore` sobre un `ConnectionManager` de Redis.
//! Cada comando lleva un timeout corto propio: si Redis se cuelga, la
//! operación falla rápido y el resto del sistema degrada a cache miss.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::info;

use super::cache_config::CacheConfig;
use super::store::{CacheError, CacheStore};

/// Cliente Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    command_timeout: Duration,
}

impl RedisStore {
    /// Conectar con Redis y verificar la conexión con un PING.
    /// Se construye una sola vez en el arranque y vive lo que el proceso.
    pub async fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        let store = Self {
            manager,
            command_timeout: Duration::from_millis(config.command_timeout_ms),
        };
        store.ping().await?;

        info!("✅ Redis conectado exitosamente");
        Ok(store)
    }

    /// Ejecutar un comando con el timeout configurado
    async fn with_timeout<T, F>(&self, command: F) -> Result<T, CacheError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.command_timeout, command).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Timeout(self.command_timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        self.with_timeout(conn.get::<_, Option<String>>(key)).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        self.with_timeout(conn.set_ex::<_, _, ()>(key, value, ttl_seconds))
            .await
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.manager.clone();
        self.with_timeout(conn.del::<_, u64>(keys.to_vec())).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.manager.clone();
        self.with_timeout(conn.keys::<_, Vec<String>>(pattern)).await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let ping = redis::cmd("PING");
        let response: String = self.with_timeout(ping.query_async(&mut conn)).await?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(CacheError::Backend(redis::RedisError::from((
                redis::ErrorKind::ResponseError,
                "respuesta inesperada al PING",
            ))))
        }
    }
}
