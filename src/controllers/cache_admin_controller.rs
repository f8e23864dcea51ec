//! Administración del cache
//!
//! Endpoint de acciones sobre el cache para el dashboard de admin. El
//! discriminador `action` se resuelve contra un enum cerrado: una acción
//! desconocida devuelve 400 con la lista completa de acciones válidas.
//! La autorización ocurre fuera de aquí, en el gateway que protege /admin.

use axum::http::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::cache::{CacheDomain, ContentCache, CACHE_NAMESPACE};
use crate::repositories::content_repository::ContentRepository;
use crate::repositories::faq_repository::FaqRepository;
use crate::utils::errors::AppError;

/// Acciones válidas del endpoint de administración del cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAdminAction {
    InvalidateFaq,
    InvalidateLicenses,
    InvalidatePrivacy,
    InvalidateStatic,
    InvalidateBeats,
    InvalidateUser,
    InvalidateAdmin,
    Warmup,
    Cleanup,
    ResetAll,
    SetCacheValue,
    GetCacheValue,
    DeleteCacheKey,
    GetKeys,
    Stats,
}

/// Lista de acciones tal como viajan por la API, para mensajes de error
pub const VALID_ACTIONS: &[&str] = &[
    "invalidate-faq",
    "invalidate-licenses",
    "invalidate-privacy",
    "invalidate-static",
    "invalidate-beats",
    "invalidate-user",
    "invalidate-admin",
    "warmup",
    "cleanup",
    "reset-all",
    "set-cache-value",
    "get-cache-value",
    "delete-cache-key",
    "get-keys",
    "stats",
];

impl CacheAdminAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "invalidate-faq" => Some(Self::InvalidateFaq),
            "invalidate-licenses" => Some(Self::InvalidateLicenses),
            "invalidate-privacy" => Some(Self::InvalidatePrivacy),
            "invalidate-static" => Some(Self::InvalidateStatic),
            "invalidate-beats" => Some(Self::InvalidateBeats),
            "invalidate-user" => Some(Self::InvalidateUser),
            "invalidate-admin" => Some(Self::InvalidateAdmin),
            "warmup" => Some(Self::Warmup),
            "cleanup" => Some(Self::Cleanup),
            "reset-all" => Some(Self::ResetAll),
            "set-cache-value" => Some(Self::SetCacheValue),
            "get-cache-value" => Some(Self::GetCacheValue),
            "delete-cache-key" => Some(Self::DeleteCacheKey),
            "get-keys" => Some(Self::GetKeys),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

pub struct CacheAdminController {
    cache: ContentCache,
    faqs: FaqRepository,
    content: ContentRepository,
}

impl CacheAdminController {
    pub fn new(pool: PgPool, cache: ContentCache) -> Self {
        Self {
            cache,
            faqs: FaqRepository::new(pool.clone()),
            content: ContentRepository::new(pool),
        }
    }

    /// Resolver y ejecutar una acción de administración del cache
    pub async fn handle_action(&self, payload: Value) -> (StatusCode, Value) {
        let raw_action = match payload.get("action").and_then(|v| v.as_str()) {
            Some(raw) => raw,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "error": "Campo 'action' requerido",
                        "valid_actions": VALID_ACTIONS,
                    }),
                );
            }
        };

        let action = match CacheAdminAction::parse(raw_action) {
            Some(action) => action,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "error": format!("Acción desconocida: '{}'", raw_action),
                        "valid_actions": VALID_ACTIONS,
                    }),
                );
            }
        };

        log::info!("🧰 Acción de cache admin: {}", raw_action);
        let manager = self.cache.manager();

        match action {
            CacheAdminAction::InvalidateFaq => {
                let deleted = manager.invalidate_faq().await;
                invalidated_response("FAQ", deleted)
            }
            CacheAdminAction::InvalidateLicenses => {
                let deleted = manager.invalidate_licenses().await;
                invalidated_response("licencias", deleted)
            }
            CacheAdminAction::InvalidatePrivacy => {
                let deleted = manager.invalidate_privacy().await;
                invalidated_response("privacidad", deleted)
            }
            CacheAdminAction::InvalidateStatic => {
                let deleted = manager.invalidate_static_pages().await;
                invalidated_response("páginas estáticas", deleted)
            }
            CacheAdminAction::InvalidateBeats => {
                let beat_id = payload
                    .get("beatId")
                    .and_then(|v| v.as_str())
                    .unwrap_or("*");
                let deleted = manager.invalidate_beat_cache(beat_id).await;
                invalidated_response("beats", deleted)
            }
            CacheAdminAction::InvalidateUser => {
                let user_id = match payload.get("userId").and_then(|v| v.as_str()) {
                    Some(user_id) => user_id,
                    None => return missing_field("userId"),
                };
                let deleted = manager.invalidate_user_cache(user_id).await;
                invalidated_response("usuario", deleted)
            }
            CacheAdminAction::InvalidateAdmin => {
                let deleted = manager.invalidate_admin_cache().await;
                invalidated_response("admin", deleted)
            }
            CacheAdminAction::Warmup => match self.warmup().await {
                Ok(data) => (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": data,
                        "message": "Cache precargado exitosamente",
                    }),
                ),
                Err(e) => {
                    log::error!("❌ Error precargando cache: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "success": false, "error": e.to_string() }),
                    )
                }
            },
            CacheAdminAction::Cleanup => {
                let temp_keys = manager.get_keys(&CacheDomain::Temp.pattern()).await;
                let deleted = manager.delete_multiple(&temp_keys).await;
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": { "deleted_keys": deleted },
                        "message": format!("Cache temporal limpiado: {} claves removidas", deleted),
                    }),
                )
            }
            CacheAdminAction::ResetAll => {
                let deleted = manager.clear_all().await;
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": { "deleted_keys": deleted },
                        "message": "Cache completo reseteado",
                    }),
                )
            }
            CacheAdminAction::SetCacheValue => {
                let key = match payload.get("key").and_then(|v| v.as_str()) {
                    Some(key) => admin_key(key),
                    None => return missing_field("key"),
                };
                let value = match payload.get("value") {
                    Some(value) => value.clone(),
                    None => return missing_field("value"),
                };
                let ttl = payload
                    .get("ttl")
                    .and_then(|v| v.as_u64())
                    .filter(|ttl| *ttl > 0)
                    .unwrap_or_else(|| CacheDomain::Temp.ttl());

                if let Err(e) = manager.set(&key, &value, ttl).await {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "success": false, "error": e.to_string() }),
                    );
                }

                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": { "key": key, "ttl": ttl },
                        "message": "Valor guardado en cache",
                    }),
                )
            }
            CacheAdminAction::GetCacheValue => {
                let key = match payload.get("key").and_then(|v| v.as_str()) {
                    Some(key) => admin_key(key),
                    None => return missing_field("key"),
                };

                let value: Option<Value> = manager.get(&key).await;
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": { "key": key, "found": value.is_some(), "value": value },
                    }),
                )
            }
            CacheAdminAction::DeleteCacheKey => {
                let key = match payload.get("key").and_then(|v| v.as_str()) {
                    Some(key) => admin_key(key),
                    None => return missing_field("key"),
                };

                manager.delete(&key).await;
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": { "key": key },
                        "message": "Clave eliminada del cache",
                    }),
                )
            }
            CacheAdminAction::GetKeys => {
                let pattern = payload
                    .get("pattern")
                    .and_then(|v| v.as_str())
                    .map(admin_pattern)
                    .unwrap_or_else(|| format!("{}:*", CACHE_NAMESPACE));

                let keys = manager.get_keys(&pattern).await;
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "data": { "pattern": pattern, "count": keys.len(), "keys": keys },
                    }),
                )
            }
            CacheAdminAction::Stats => {
                let stats = manager.get_cache_stats().await;
                (
                    StatusCode::OK,
                    json!({ "success": true, "data": stats }),
                )
            }
        }
    }

    /// Precargar los dominios de contenido que sirven la portada: la
    /// primera página de FAQ, los tiers de licencia y la privacidad.
    async fn warmup(&self) -> Result<Value, AppError> {
        let faq_repo = &self.faqs;
        let content_repo = &self.content;

        let faqs = self
            .cache
            .with_faq_cache(&[("language", "en"), ("page", "1")], move || async move {
                let response = faq_repo.list(None, "en", 1, 20).await?;
                Ok(response)
            });
        let licenses = self.cache.with_license_cache(&[], move || async move {
            let tiers = content_repo.license_tiers().await?;
            Ok(tiers)
        });
        let privacy = self
            .cache
            .with_privacy_cache(&[("language", "en")], move || async move {
                let page = content_repo.privacy_page("en").await?;
                Ok(page)
            });

        let (faqs, licenses, privacy) = futures::join!(faqs, licenses, privacy);

        let faqs = faqs.map_err(crate::utils::errors::unwrap_app_error)?;
        let licenses = licenses.map_err(crate::utils::errors::unwrap_app_error)?;
        let privacy = privacy.map_err(crate::utils::errors::unwrap_app_error)?;

        Ok(json!({
            "faqs_loaded": faqs.faqs.len(),
            "license_tiers_loaded": licenses.len(),
            "privacy_loaded": privacy.is_some(),
        }))
    }
}

/// Las claves ad hoc del admin sin namespace caen en el bucket temporal;
/// una clave ya namespaceada se usa tal cual. Así el endpoint nunca
/// escribe fuera del namespace de la aplicación.
fn admin_key(raw: &str) -> String {
    if raw.starts_with(CACHE_NAMESPACE) {
        raw.to_string()
    } else {
        format!("{}:{}", CacheDomain::Temp.prefix(), raw)
    }
}

/// Mismo criterio que `admin_key` para patterns de listado
fn admin_pattern(raw: &str) -> String {
    if raw.starts_with(CACHE_NAMESPACE) {
        raw.to_string()
    } else {
        format!("{}:{}", CACHE_NAMESPACE, raw)
    }
}

fn invalidated_response(domain: &str, deleted: u64) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({
            "success": true,
            "data": { "deleted_keys": deleted },
            "message": format!("Cache de {} invalidado: {} claves removidas", domain, deleted),
        }),
    )
}

fn missing_field(field: &str) -> (StatusCode, Value) {
    (
        StatusCode::BAD_REQUEST,
        json!({
            "success": false,
            "error": format!("Campo '{}' requerido para esta acción", field),
        }),
    )
}
