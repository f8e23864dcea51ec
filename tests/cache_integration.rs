//! Tests de integración del cache de contenido
//!
//! Ejercitan la API pública del cache (manager, read-through, helpers de
//! dominio e invalidación) contra el store en memoria, sin Redis ni
//! PostgreSQL de por medio.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use beatstore_backend::cache::{
    CacheConfig, CacheManager, CacheOptions, ContentCache, MemoryStore,
};

fn cache_manager() -> CacheManager {
    CacheManager::new(Arc::new(MemoryStore::new()), CacheConfig::default())
}

/// Payload de FAQ como el que cachean los handlers reales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FaqPage {
    faqs: Vec<String>,
    total_count: i64,
}

fn faq_page() -> FaqPage {
    FaqPage {
        faqs: vec![
            "¿Qué incluye la licencia básica?".to_string(),
            "¿Puedo mejorar mi licencia después?".to_string(),
            "¿La licencia exclusiva retira el beat de la tienda?".to_string(),
        ],
        total_count: 3,
    }
}

#[tokio::test]
async fn test_faq_de_punta_a_punta_con_invalidacion() {
    let cache = ContentCache::new(cache_manager());
    let fetches = Arc::new(AtomicU32::new(0));

    let fetch = |contador: Arc<AtomicU32>| async move {
        contador.fetch_add(1, Ordering::SeqCst);
        Ok(faq_page())
    };

    // primera llamada: miss, ejecuta el fetch
    let primera: FaqPage = cache
        .with_faq_cache(&[("category", "licenses")], || fetch(fetches.clone()))
        .await
        .unwrap();
    assert_eq!(primera, faq_page());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // segunda llamada con los mismos parámetros: hit, sin fetch
    let segunda: FaqPage = cache
        .with_faq_cache(&[("category", "licenses")], || fetch(fetches.clone()))
        .await
        .unwrap();
    assert_eq!(segunda, primera);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // acción administrativa invalidate-faq
    let deleted = cache.manager().invalidate_faq().await;
    assert_eq!(deleted, 1);

    // tras invalidar, la misma llamada vuelve a ejecutar el fetch
    let tercera: FaqPage = cache
        .with_faq_cache(&[("category", "licenses")], || fetch(fetches.clone()))
        .await
        .unwrap();
    assert_eq!(tercera, primera);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_los_parametros_no_dependen_del_orden() {
    let cache = ContentCache::new(cache_manager());
    let fetches = Arc::new(AtomicU32::new(0));

    let contador = fetches.clone();
    let _: FaqPage = cache
        .with_faq_cache(&[("category", "licenses"), ("page", "2")], move || async move {
            contador.fetch_add(1, Ordering::SeqCst);
            Ok(faq_page())
        })
        .await
        .unwrap();

    // mismo mapa en otro orden: debe ser hit de la misma clave
    let contador = fetches.clone();
    let _: FaqPage = cache
        .with_faq_cache(&[("page", "2"), ("category", "licenses")], move || async move {
            contador.fetch_add(1, Ordering::SeqCst);
            Ok(faq_page())
        })
        .await
        .unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ttl_expira_y_get_devuelve_none() {
    let cache = cache_manager();
    cache
        .set("beatstore:temp:fugaz", &"valor".to_string(), 1)
        .await
        .unwrap();

    let antes: Option<String> = cache.get("beatstore:temp:fugaz").await;
    assert_eq!(antes, Some("valor".to_string()));

    tokio::time::sleep(Duration::from_millis(1100)).await;

    // expirado: miss limpio, no error
    let despues: Option<String> = cache.get("beatstore:temp:fugaz").await;
    assert!(despues.is_none());
}

#[tokio::test]
async fn test_bypass_deja_intacto_el_valor_cacheado() {
    let cache = cache_manager();
    cache
        .set("beatstore:beats:featured", &vec!["beat-viejo".to_string()], 300)
        .await
        .unwrap();

    let fresco: Vec<String> = cache
        .with_cache(
            "beatstore:beats:featured",
            CacheOptions::bypass(),
            || async { Ok(vec!["beat-nuevo".to_string()]) },
        )
        .await
        .unwrap();
    assert_eq!(fresco, vec!["beat-nuevo".to_string()]);

    // el bypass ni leyó ni sobreescribió la entrada existente
    let cacheado: Option<Vec<String>> = cache.get("beatstore:beats:featured").await;
    assert_eq!(cacheado, Some(vec!["beat-viejo".to_string()]));
}

#[tokio::test]
async fn test_fan_out_de_beats_respeta_otros_dominios() {
    let cache = cache_manager();
    cache.set("beatstore:beats:id:1", &"detalle", 300).await.unwrap();
    cache.set("beatstore:beats:featured", &"lista", 300).await.unwrap();
    cache.set("beatstore:faq:category:x", &"faq", 43_200).await.unwrap();

    cache.invalidate_beat_cache("1").await;

    // el pattern sobre-cubre el dominio entero de beats
    assert!(!cache.exists("beatstore:beats:id:1").await);
    assert!(!cache.exists("beatstore:beats:featured").await);
    // y no toca el dominio de FAQ
    assert!(cache.exists("beatstore:faq:category:x").await);
}

#[tokio::test]
async fn test_misses_concurrentes_sobre_la_misma_clave() {
    let cache = cache_manager();
    let fetches = Arc::new(AtomicU32::new(0));

    let fetch_lento = |contador: Arc<AtomicU32>| async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        contador.fetch_add(1, Ordering::SeqCst);
        Ok("resultado".to_string())
    };

    let (a, b) = tokio::join!(
        cache.with_cache(
            "beatstore:beats:page:1",
            CacheOptions::with_ttl(300),
            || fetch_lento(fetches.clone()),
        ),
        cache.with_cache(
            "beatstore:beats:page:1",
            CacheOptions::with_ttl(300),
            || fetch_lento(fetches.clone()),
        ),
    );

    // ambos completan con el mismo resultado; que el fetch corriera dos
    // veces es el costo asumido de no tener single-flight
    assert_eq!(a.unwrap(), "resultado");
    assert_eq!(b.unwrap(), "resultado");
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}
