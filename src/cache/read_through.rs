//! Read-through sobre el Cache Manager
//!
//! `with_cache` convierte el baile get/fetch/set en una sola llamada para
//! los handlers: consulta el cache, en miss ejecuta el fetch (la query real
//! contra la base) y guarda el resultado. Si el store no está disponible
//! todo degrada a llamar el fetch directo, la corrección no depende del
//! cache.
//!
//! No hay deduplicación de misses concurrentes para la misma clave: dos
//! requests fríos ejecutan el fetch cada uno y escriben el mismo resultado.
//! Con el QPS de estos endpoints de contenido es un intercambio aceptable;
//! si la carga crece, este es el primer sitio donde poner un single-flight.

use std::future::Future;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::manager::CacheManager;

/// Opciones de una llamada read-through
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    /// TTL en segundos; sin valor se usa el TTL de respaldo del manager
    pub ttl: Option<u64>,
    /// Saltarse el cache por completo: ni lee ni escribe. Es una válvula
    /// de escape explícita, no una forma de limpiar el cache.
    pub skip_cache: bool,
}

impl CacheOptions {
    /// Opciones con TTL explícito
    pub fn with_ttl(ttl_seconds: u64) -> Self {
        Self {
            ttl: Some(ttl_seconds),
            skip_cache: false,
        }
    }

    /// Opciones que puentean el cache
    pub fn bypass() -> Self {
        Self {
            ttl: None,
            skip_cache: true,
        }
    }
}

impl CacheManager {
    /// Leer del cache o ejecutar el fetch y cachear el resultado.
    ///
    /// El valor se devuelve aunque el `set` posterior falle: una escritura
    /// fallida degrada a "miss la próxima vez", nunca rompe la lectura.
    pub async fn with_cache<T, F, Fut>(
        &self,
        key: &str,
        options: CacheOptions,
        fetch: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if options.skip_cache {
            debug!("⏭️ Cache BYPASS para clave: {}", key);
            return fetch().await;
        }

        if let Some(cached) = self.get::<T>(key).await {
            return Ok(cached);
        }

        let value = fetch().await?;

        let ttl = options.ttl.unwrap_or_else(|| self.default_ttl());
        if let Err(e) = self.set(key, &value, ttl).await {
            warn!("⚠️ No se pudo cachear la clave {}: {}", key, e);
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::cache::cache_config::CacheConfig;
    use crate::cache::store::{FailingStore, MemoryStore};

    fn manager() -> CacheManager {
        CacheManager::new(Arc::new(MemoryStore::new()), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_primer_miss_ejecuta_fetch_y_cachea() {
        let cache = manager();
        let llamadas = Arc::new(AtomicU32::new(0));

        let contador = llamadas.clone();
        let value: String = cache
            .with_cache("beatstore:temp:v", CacheOptions::with_ttl(60), move || async move {
                contador.fetch_add(1, Ordering::SeqCst);
                Ok("valor".to_string())
            })
            .await
            .unwrap();

        assert_eq!(value, "valor");
        assert_eq!(llamadas.load(Ordering::SeqCst), 1);

        // segunda llamada: hit, el fetch que falla no llega a ejecutarse
        let value: String = cache
            .with_cache("beatstore:temp:v", CacheOptions::with_ttl(60), || async {
                anyhow::bail!("el fetch no debería ejecutarse en un hit")
            })
            .await
            .unwrap();

        assert_eq!(value, "valor");
        assert_eq!(llamadas.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bypass_no_lee_ni_sobreescribe() {
        let cache = manager();
        cache
            .set("beatstore:temp:b", &"cacheado".to_string(), 60)
            .await
            .unwrap();

        let value: String = cache
            .with_cache("beatstore:temp:b", CacheOptions::bypass(), || async {
                Ok("fresco".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "fresco");

        // el valor cacheado sigue intacto después del bypass
        let cached: Option<String> = cache.get("beatstore:temp:b").await;
        assert_eq!(cached, Some("cacheado".to_string()));
    }

    #[tokio::test]
    async fn test_store_caido_degrada_al_fetch() {
        let cache = CacheManager::new(Arc::new(FailingStore), CacheConfig::default());

        let value: i32 = cache
            .with_cache("beatstore:temp:d", CacheOptions::default(), || async { Ok(42) })
            .await
            .unwrap();

        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_error_del_fetch_se_propaga() {
        let cache = manager();

        let result: Result<i32> = cache
            .with_cache("beatstore:temp:e", CacheOptions::default(), || async {
                anyhow::bail!("la base de datos no responde")
            })
            .await;

        assert!(result.is_err());
        // un fetch fallido no deja nada cacheado
        assert!(!cache.exists("beatstore:temp:e").await);
    }

    #[tokio::test]
    async fn test_misses_concurrentes_completan_ambos() {
        let cache = manager();
        let llamadas = Arc::new(AtomicU32::new(0));

        let c1 = llamadas.clone();
        let c2 = llamadas.clone();
        let fetch_lento = |contador: Arc<AtomicU32>| async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            contador.fetch_add(1, Ordering::SeqCst);
            Ok("resultado".to_string())
        };

        let (a, b): (Result<String>, Result<String>) = tokio::join!(
            cache.with_cache("beatstore:temp:c", CacheOptions::with_ttl(60), || fetch_lento(c1)),
            cache.with_cache("beatstore:temp:c", CacheOptions::with_ttl(60), || fetch_lento(c2)),
        );

        assert_eq!(a.unwrap(), "resultado");
        assert_eq!(b.unwrap(), "resultado");
        // sin single-flight ambos fríos ejecutan el fetch, y no pasa nada
        assert_eq!(llamadas.load(Ordering::SeqCst), 2);
    }
}
