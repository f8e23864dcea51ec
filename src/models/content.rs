//! Modelos de contenido estático
//!
//! Tiers de licencia y páginas estáticas (privacidad). Son el contenido
//! que casi nunca cambia y por eso lleva los TTLs largos del cache.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Tier de licencia - mapea exactamente a la tabla license_tiers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LicenseTier {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    /// Lista de condiciones del tier, almacenada como JSONB
    pub features: serde_json::Value,
    pub sort_order: i32,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Página estática - mapea exactamente a la tabla static_pages
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaticPage {
    pub id: Uuid,
    pub slug: String,
    pub language: String,
    pub title: String,
    pub body_html: String,
    pub updated_at: DateTime<Utc>,
}

/// Request para reescribir la página de privacidad
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePageRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub body_html: String,

    pub language: Option<String>,
}
