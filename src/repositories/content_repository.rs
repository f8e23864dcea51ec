use crate::models::content::{LicenseTier, StaticPage, UpdatePageRequest};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tiers de licencia activos, en el orden de la página de precios
    pub async fn license_tiers(&self) -> Result<Vec<LicenseTier>, AppError> {
        let tiers = sqlx::query_as::<_, LicenseTier>(
            "SELECT * FROM license_tiers WHERE is_active = TRUE ORDER BY sort_order",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing license tiers: {}", e)))?;

        Ok(tiers)
    }

    /// Página de privacidad en un idioma concreto
    pub async fn privacy_page(&self, language: &str) -> Result<Option<StaticPage>, AppError> {
        let page = sqlx::query_as::<_, StaticPage>(
            "SELECT * FROM static_pages WHERE slug = 'privacy' AND language = $1",
        )
        .bind(language)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding privacy page: {}", e)))?;

        Ok(page)
    }

    /// Reescribir la página de privacidad (la crea si no existe)
    pub async fn upsert_privacy_page(
        &self,
        request: &UpdatePageRequest,
    ) -> Result<StaticPage, AppError> {
        let language = request.language.as_deref().unwrap_or("en");

        let page = sqlx::query_as::<_, StaticPage>(
            r#"
            INSERT INTO static_pages (id, slug, language, title, body_html, updated_at)
            VALUES ($1, 'privacy', $2, $3, $4, NOW())
            ON CONFLICT (slug, language) DO UPDATE SET
                title = EXCLUDED.title,
                body_html = EXCLUDED.body_html,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(language)
        .bind(&request.title)
        .bind(&request.body_html)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error upserting privacy page: {}", e)))?;

        Ok(page)
    }

    pub async fn count_pages(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM static_pages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error counting pages: {}", e)))?;

        Ok(count)
    }
}
