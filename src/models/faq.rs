//! Modelo de FAQ
//!
//! Este módulo contiene el struct Faq y sus requests de CRUD.
//! Mapea exactamente a la tabla faqs con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// FAQ principal - mapea exactamente a la tabla faqs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub language: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una FAQ
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaqRequest {
    #[validate(length(min = 5, max = 500))]
    pub question: String,

    #[validate(length(min = 5, max = 5000))]
    pub answer: String,

    #[validate(length(min = 2, max = 50))]
    pub category: String,

    pub language: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// Request para actualizar una FAQ existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFaqRequest {
    #[validate(length(min = 5, max = 500))]
    pub question: Option<String>,

    #[validate(length(min = 5, max = 5000))]
    pub answer: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub category: Option<String>,

    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// Página de FAQs tal como se cachea y se devuelve al frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqListResponse {
    pub faqs: Vec<Faq>,
    pub total_count: i64,
    pub page: i64,
    pub per_page: i64,
}
