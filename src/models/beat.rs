//! Modelo de Beat
//!
//! Este módulo contiene el struct Beat y sus requests de actualización.
//! Mapea exactamente a la tabla beats con primary key 'id'. Los precios
//! por tier de licencia usan Decimal, nunca float.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Beat principal - mapea exactamente a la tabla beats
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Beat {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub bpm: i32,
    pub price_basic: Decimal,
    pub price_premium: Decimal,
    pub price_exclusive: Decimal,
    pub cover_url: Option<String>,
    pub preview_url: Option<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub play_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para actualizar un beat
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBeatRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub genre: Option<String>,

    #[validate(range(min = 40, max = 300))]
    pub bpm: Option<i32>,

    pub price_basic: Option<Decimal>,
    pub price_premium: Option<Decimal>,
    pub price_exclusive: Option<Decimal>,
    pub cover_url: Option<String>,
    pub preview_url: Option<String>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
}

/// Página de beats tal como se cachea y se devuelve al frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatListResponse {
    pub beats: Vec<Beat>,
    pub total_count: i64,
    pub page: i64,
    pub per_page: i64,
}
