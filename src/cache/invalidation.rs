//! Invalidación de cache por dominios
//!
//! Las claves son función determinista de (dominio, parámetros) pero nadie
//! registra qué combinaciones de parámetros se escribieron, así que la
//! invalidación no puede apuntar a claves exactas: cada dominio borra por
//! patterns glob que sobre-cubren todas sus claves posibles. Borrar de más
//! solo cuesta misses; no borrar una clave rancia sí sería un bug.
//!
//! Los patterns salen de `CacheDomain`, el mismo sitio del que salen los
//! prefijos de clave, así no hay literales duplicados que se desincronicen.

use tracing::{info, warn};

use super::domain::CacheDomain;
use super::keys;
use super::manager::CacheManager;

impl CacheManager {
    /// Borrar todas las claves que matchean la lista de patterns.
    /// Si el store falla, se loguea y se devuelve lo borrado hasta ahí:
    /// el dominio servirá datos rancios hasta que expire el TTL, pero la
    /// mutación que disparó la invalidación nunca falla por esto.
    async fn invalidate_patterns(&self, patterns: &[String]) -> u64 {
        let mut total = 0;

        for pattern in patterns {
            let keys = self.get_keys(pattern).await;
            if keys.is_empty() {
                continue;
            }
            total += self.delete_multiple(&keys).await;
        }

        if total == 0 {
            warn!("🗑️ Invalidación sin claves borradas para patterns: {:?}", patterns);
        }

        total
    }

    /// Invalidar las páginas estáticas: licencias, privacidad y FAQ
    pub async fn invalidate_static_pages(&self) -> u64 {
        let patterns = vec![
            CacheDomain::Licenses.pattern(),
            CacheDomain::Privacy.pattern(),
            CacheDomain::Faq.pattern(),
        ];

        let deleted = self.invalidate_patterns(&patterns).await;
        info!("🗑️ Páginas estáticas invalidadas ({} claves)", deleted);
        deleted
    }

    /// Invalidar los listados de FAQ
    pub async fn invalidate_faq(&self) -> u64 {
        let deleted = self
            .invalidate_patterns(&[CacheDomain::Faq.pattern()])
            .await;
        info!("🗑️ Cache de FAQ invalidado ({} claves)", deleted);
        deleted
    }

    /// Invalidar los tiers de licencia
    pub async fn invalidate_licenses(&self) -> u64 {
        let deleted = self
            .invalidate_patterns(&[CacheDomain::Licenses.pattern()])
            .await;
        info!("🗑️ Cache de licencias invalidado ({} claves)", deleted);
        deleted
    }

    /// Invalidar el texto de privacidad
    pub async fn invalidate_privacy(&self) -> u64 {
        let deleted = self
            .invalidate_patterns(&[CacheDomain::Privacy.pattern()])
            .await;
        info!("🗑️ Cache de privacidad invalidado ({} claves)", deleted);
        deleted
    }

    /// Invalidar el cache de beats tras un cambio en un beat concreto.
    ///
    /// Cualquier listado o featured puede contener el beat, así que cae el
    /// dominio entero y no solo la clave del detalle. Las stats de admin
    /// cuentan beats, caen también.
    pub async fn invalidate_beat_cache(&self, beat_id: &str) -> u64 {
        let patterns = vec![CacheDomain::Beats.pattern(), CacheDomain::Admin.pattern()];

        let deleted = self.invalidate_patterns(&patterns).await;
        info!("🗑️ Cache de beats invalidado por beat {} ({} claves)", beat_id, deleted);
        deleted
    }

    /// Invalidar el perfil cacheado de un usuario concreto
    pub async fn invalidate_user_cache(&self, user_id: &str) -> u64 {
        let deleted = self
            .invalidate_patterns(&[keys::user_profile_pattern(user_id)])
            .await;
        info!("🗑️ Cache de usuario {} invalidado ({} claves)", user_id, deleted);
        deleted
    }

    /// Invalidar las estadísticas de admin
    pub async fn invalidate_admin_cache(&self) -> u64 {
        let deleted = self
            .invalidate_patterns(&[CacheDomain::Admin.pattern()])
            .await;
        info!("🗑️ Cache de admin invalidado ({} claves)", deleted);
        deleted
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::cache_config::CacheConfig;
    use crate::cache::store::MemoryStore;

    fn manager() -> CacheManager {
        CacheManager::new(Arc::new(MemoryStore::new()), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_invalidar_beats_sobrecubre_el_dominio() {
        let cache = manager();
        cache.set("beatstore:beats:id:1", &"detalle", 300).await.unwrap();
        cache.set("beatstore:beats:featured", &"lista", 300).await.unwrap();
        cache
            .set("beatstore:faq:category:x", &"faq", 300)
            .await
            .unwrap();

        let deleted = cache.invalidate_beat_cache("1").await;

        // caen las dos claves de beats aunque solo cambió el beat 1
        assert!(deleted >= 2);
        assert!(!cache.exists("beatstore:beats:id:1").await);
        assert!(!cache.exists("beatstore:beats:featured").await);
        // el dominio faq no se toca
        assert!(cache.exists("beatstore:faq:category:x").await);
    }

    #[tokio::test]
    async fn test_invalidar_usuario_es_por_usuario() {
        let cache = manager();
        cache.set("beatstore:users:id:42", &"perfil", 600).await.unwrap();
        cache.set("beatstore:users:id:7", &"otro", 600).await.unwrap();

        let deleted = cache.invalidate_user_cache("42").await;

        assert_eq!(deleted, 1);
        assert!(!cache.exists("beatstore:users:id:42").await);
        assert!(cache.exists("beatstore:users:id:7").await);
    }

    #[tokio::test]
    async fn test_invalidar_paginas_estaticas_cubre_los_tres_dominios() {
        let cache = manager();
        cache.set("beatstore:licenses", &"tiers", 86_400).await.unwrap();
        cache
            .set("beatstore:privacy:language:en", &"texto", 86_400)
            .await
            .unwrap();
        cache
            .set("beatstore:faq:category:x", &"faq", 43_200)
            .await
            .unwrap();
        cache.set("beatstore:beats:featured", &"lista", 300).await.unwrap();

        let deleted = cache.invalidate_static_pages().await;

        assert_eq!(deleted, 3);
        assert!(cache.exists("beatstore:beats:featured").await);
    }

    #[tokio::test]
    async fn test_invalidar_dominio_vacio_devuelve_cero() {
        let cache = manager();
        assert_eq!(cache.invalidate_admin_cache().await, 0);
    }

    #[tokio::test]
    async fn test_invalidar_con_store_caido_no_falla() {
        use crate::cache::store::FailingStore;

        let cache = CacheManager::new(Arc::new(FailingStore), CacheConfig::default());

        // el dominio queda rancio hasta que expire el TTL, pero la llamada
        // vuelve sin error
        assert_eq!(cache.invalidate_static_pages().await, 0);
        assert_eq!(cache.invalidate_beat_cache("1").await, 0);
    }
}
