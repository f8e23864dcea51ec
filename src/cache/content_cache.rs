//! Caches de contenido por dominio
//!
//! Wrappers finos sobre `with_cache` que fijan el prefijo de dominio y el
//! TTL de la tabla de políticas. No añaden ninguna lógica propia.

use std::future::Future;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::domain::CacheDomain;
use super::keys;
use super::manager::CacheManager;
use super::read_through::CacheOptions;

/// Helpers de cache para el contenido de la tienda
#[derive(Clone)]
pub struct ContentCache {
    manager: CacheManager,
}

impl ContentCache {
    pub fn new(manager: CacheManager) -> Self {
        Self { manager }
    }

    /// Acceso al manager para operaciones directas (admin, invalidación)
    pub fn manager(&self) -> &CacheManager {
        &self.manager
    }

    async fn with_domain_cache<T, F, Fut>(
        &self,
        domain: CacheDomain,
        params: &[(&str, &str)],
        fetch: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = keys::build_key(domain, params);
        self.manager
            .with_cache(&key, CacheOptions::with_ttl(domain.ttl()), fetch)
            .await
    }

    /// Listados de FAQ (12h)
    pub async fn with_faq_cache<T, F, Fut>(&self, params: &[(&str, &str)], fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.with_domain_cache(CacheDomain::Faq, params, fetch).await
    }

    /// Tiers de licencia (24h)
    pub async fn with_license_cache<T, F, Fut>(&self, params: &[(&str, &str)], fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.with_domain_cache(CacheDomain::Licenses, params, fetch)
            .await
    }

    /// Texto de privacidad (24h)
    pub async fn with_privacy_cache<T, F, Fut>(&self, params: &[(&str, &str)], fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.with_domain_cache(CacheDomain::Privacy, params, fetch)
            .await
    }

    /// Listados y detalle de beats (5 min)
    pub async fn with_beat_cache<T, F, Fut>(&self, params: &[(&str, &str)], fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.with_domain_cache(CacheDomain::Beats, params, fetch)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::cache::cache_config::CacheConfig;
    use crate::cache::store::MemoryStore;

    fn content_cache() -> ContentCache {
        ContentCache::new(CacheManager::new(
            Arc::new(MemoryStore::new()),
            CacheConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_helper_de_faq_usa_la_clave_del_dominio() {
        let cache = content_cache();

        let value: String = cache
            .with_faq_cache(&[("category", "licenses")], || async {
                Ok("faqs".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "faqs");

        // la clave quedó bajo el prefijo del dominio faq
        let keys = cache.manager().get_keys("beatstore:faq:*").await;
        assert_eq!(keys, vec!["beatstore:faq:category:licenses".to_string()]);
    }

    #[tokio::test]
    async fn test_helpers_de_dominios_distintos_no_colisionan() {
        let cache = content_cache();
        let llamadas = Arc::new(AtomicU32::new(0));

        let c1 = llamadas.clone();
        let _: i32 = cache
            .with_license_cache(&[], move || async move {
                c1.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })
            .await
            .unwrap();

        // mismo mapa de parámetros vacío, dominio distinto: otro fetch
        let c2 = llamadas.clone();
        let _: i32 = cache
            .with_privacy_cache(&[], move || async move {
                c2.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            })
            .await
            .unwrap();

        assert_eq!(llamadas.load(Ordering::SeqCst), 2);
    }
}
