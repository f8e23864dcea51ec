//! Cache Manager
//!
//! Interfaz segura sobre el store remoto: serialización JSON, namespace
//! propio y contención de errores. El contrato central es que una caída
//! de Redis nunca se convierte en error de aplicación: las lecturas
//! degradan a miss y las escrituras/borrados a no-op con log. Los errores
//! se colapsan aquí y en ningún otro sitio.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::cache_config::CacheConfig;
use super::domain::CACHE_NAMESPACE;
use super::store::{CacheError, CacheStore};

/// Contadores de actividad del cache, visibles en las estadísticas
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
}

/// Snapshot de diagnóstico del cache. `sample_keys` es un prefijo acotado
/// del listado de claves, no una muestra aleatoria: sirve para debug,
/// no para análisis estadístico.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_keys: usize,
    pub sample_keys: Vec<String>,
    pub hits: u64,
    pub misses: u64,
    pub errors: u64,
}

/// Manager de cache sobre un `CacheStore` inyectado
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    metrics: Arc<CacheMetrics>,
}

impl CacheManager {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// TTL de respaldo para escrituras sin TTL explícito
    pub fn default_ttl(&self) -> u64 {
        self.config.default_ttl
    }

    /// Leer y deserializar el valor de una clave.
    ///
    /// `None` significa "no hay valor utilizable": cubre miss real, error
    /// del store y entrada corrupta. Un `null` cacheado literalmente también
    /// cae aquí; ningún consumidor actual cachea valores falsy, si alguno
    /// llegara a necesitarlo habría que envolver el payload en un tipo
    /// presente/ausente explícito.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get_raw(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!("📥 Cache HIT para clave: {}", key);
                    self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                    Some(value)
                }
                Err(e) => {
                    warn!("⚠️ Entrada corrupta en cache para clave {}: {}", key, e);
                    self.metrics.errors.fetch_add(1, Ordering::Relaxed);
                    None
                }
            },
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                self.metrics.errors.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Serializar y escribir un valor con TTL relativo en segundos.
    ///
    /// Un error del store se traga con log (la clave quedará como miss en
    /// la próxima lectura). Un error de serialización sí se propaga: es un
    /// bug del caller, no un fallo operacional.
    pub async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        let serialized = serde_json::to_string(value)?;

        match self.store.set_raw(key, &serialized, ttl_seconds).await {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando en cache para clave {}: {}", key, e);
                self.metrics.errors.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
        }
    }

    /// Borrar una clave, best-effort
    pub async fn delete(&self, key: &str) {
        let keys = [key.to_string()];
        self.delete_multiple(&keys).await;
    }

    /// Borrar un lote de claves, best-effort. Devuelve cuántas existían.
    pub async fn delete_multiple(&self, keys: &[String]) -> u64 {
        if keys.is_empty() {
            return 0;
        }

        match self.store.delete(keys).await {
            Ok(count) => {
                debug!("🗑️ Cache DELETE de {} claves (existían: {})", keys.len(), count);
                count
            }
            Err(e) => {
                warn!("⚠️ Error eliminando {} claves del cache: {}", keys.len(), e);
                self.metrics.errors.fetch_add(1, Ordering::Relaxed);
                0
            }
        }
    }

    /// Listar claves por patrón glob dentro del namespace de la aplicación.
    ///
    /// Operación cara (recorre el keyspace): usar siempre patterns acotados
    /// por dominio, nunca un `*` pelado en un loop caliente. Un patrón fuera
    /// del namespace se rechaza, este cache no toca claves ajenas.
    pub async fn get_keys(&self, pattern: &str) -> Vec<String> {
        if !pattern.starts_with(CACHE_NAMESPACE) {
            warn!("⚠️ Patrón fuera del namespace rechazado: {}", pattern);
            return Vec::new();
        }

        match self.store.keys(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("⚠️ Error listando claves con patrón {}: {}", pattern, e);
                self.metrics.errors.fetch_add(1, Ordering::Relaxed);
                Vec::new()
            }
        }
    }

    /// Verificar si una clave tiene valor. Implementado como lectura no
    /// nula, hereda la ambigüedad de `get` con nulls cacheados.
    pub async fn exists(&self, key: &str) -> bool {
        matches!(self.store.get_raw(key).await, Ok(Some(_)))
    }

    /// Total de claves bajo el namespace. Solo diagnóstico, usa el mismo
    /// scan caro que `get_keys`.
    pub async fn cache_size(&self) -> usize {
        self.get_keys(&format!("{}:*", CACHE_NAMESPACE)).await.len()
    }

    /// Borrar todas las claves del namespace. Destructivo, solo para
    /// tooling de admin y tests.
    pub async fn clear_all(&self) -> u64 {
        let keys = self.get_keys(&format!("{}:*", CACHE_NAMESPACE)).await;
        let deleted = self.delete_multiple(&keys).await;
        warn!("🧹 Cache completo limpiado ({} claves)", deleted);
        deleted
    }

    /// Snapshot de estadísticas para el dashboard de admin
    pub async fn get_cache_stats(&self) -> CacheStats {
        let keys = self.get_keys(&format!("{}:*", CACHE_NAMESPACE)).await;
        let sample_keys = keys
            .iter()
            .take(self.config.stats_sample_size)
            .cloned()
            .collect();

        CacheStats {
            total_keys: keys.len(),
            sample_keys,
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            errors: self.metrics.errors.load(Ordering::Relaxed),
        }
    }

    /// Verificar si el store responde
    pub async fn is_connected(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;

    fn manager() -> CacheManager {
        CacheManager::new(Arc::new(MemoryStore::new()), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_set_y_get_redondean_json() {
        let cache = manager();
        cache
            .set("beatstore:temp:saludo", &"hola".to_string(), 60)
            .await
            .unwrap();

        let value: Option<String> = cache.get("beatstore:temp:saludo").await;
        assert_eq!(value, Some("hola".to_string()));
    }

    #[tokio::test]
    async fn test_get_de_clave_ausente_es_none() {
        let cache = manager();
        let value: Option<String> = cache.get("beatstore:temp:nada").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_exists_via_lectura() {
        let cache = manager();
        assert!(!cache.exists("beatstore:temp:flag").await);

        cache.set("beatstore:temp:flag", &true, 60).await.unwrap();
        assert!(cache.exists("beatstore:temp:flag").await);
    }

    #[tokio::test]
    async fn test_get_keys_rechaza_patrones_fuera_del_namespace() {
        let cache = manager();
        cache.set("beatstore:temp:a", &1, 60).await.unwrap();

        assert!(cache.get_keys("otro_namespace:*").await.is_empty());
        assert_eq!(cache.get_keys("beatstore:temp:*").await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_vacia_el_namespace() {
        let cache = manager();
        cache.set("beatstore:faq:x", &1, 60).await.unwrap();
        cache.set("beatstore:beats:y", &2, 60).await.unwrap();

        assert_eq!(cache.clear_all().await, 2);
        assert_eq!(cache.cache_size().await, 0);
    }

    #[tokio::test]
    async fn test_stats_cuentan_hits_y_misses() {
        let cache = manager();
        cache.set("beatstore:temp:n", &7, 60).await.unwrap();

        let _: Option<i32> = cache.get("beatstore:temp:n").await;
        let _: Option<i32> = cache.get("beatstore:temp:ausente").await;

        let stats = cache.get_cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_keys, 1);
        assert_eq!(stats.sample_keys, vec!["beatstore:temp:n".to_string()]);
    }

    #[tokio::test]
    async fn test_entrada_corrupta_cuenta_como_miss() {
        let store = Arc::new(MemoryStore::new());
        use crate::cache::store::CacheStore;
        store
            .set_raw("beatstore:temp:roto", "esto no es json{", 60)
            .await
            .unwrap();

        let cache = CacheManager::new(store, CacheConfig::default());
        let value: Option<i32> = cache.get("beatstore:temp:roto").await;
        assert!(value.is_none());

        let stats = cache.get_cache_stats().await;
        assert_eq!(stats.errors, 1);
    }
}
