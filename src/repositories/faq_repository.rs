use crate::models::faq::{CreateFaqRequest, Faq, FaqListResponse, UpdateFaqRequest};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listar FAQs publicadas con filtro opcional de categoría y paginación
    pub async fn list(
        &self,
        category: Option<&str>,
        language: &str,
        page: i64,
        per_page: i64,
    ) -> Result<FaqListResponse, AppError> {
        let offset = (page - 1) * per_page;

        let (faqs, total_count) = if let Some(category) = category {
            let faqs = sqlx::query_as::<_, Faq>(
                r#"
                SELECT * FROM faqs
                WHERE is_published = TRUE AND language = $1 AND category = $2
                ORDER BY sort_order, created_at
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(language)
            .bind(category)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing faqs: {}", e)))?;

            let (total_count,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM faqs WHERE is_published = TRUE AND language = $1 AND category = $2",
            )
            .bind(language)
            .bind(category)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error counting faqs: {}", e)))?;

            (faqs, total_count)
        } else {
            let faqs = sqlx::query_as::<_, Faq>(
                r#"
                SELECT * FROM faqs
                WHERE is_published = TRUE AND language = $1
                ORDER BY sort_order, created_at
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(language)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing faqs: {}", e)))?;

            let (total_count,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM faqs WHERE is_published = TRUE AND language = $1",
            )
            .bind(language)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error counting faqs: {}", e)))?;

            (faqs, total_count)
        };

        Ok(FaqListResponse {
            faqs,
            total_count,
            page,
            per_page,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Faq>, AppError> {
        let result = sqlx::query_as::<_, Faq>("SELECT * FROM faqs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding faq: {}", e)))?;

        Ok(result)
    }

    pub async fn create(&self, request: &CreateFaqRequest) -> Result<Faq, AppError> {
        let result = sqlx::query_as::<_, Faq>(
            r#"
            INSERT INTO faqs (id, question, answer, category, language, sort_order, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.question)
        .bind(&request.answer)
        .bind(&request.category)
        .bind(request.language.as_deref().unwrap_or("en"))
        .bind(request.sort_order.unwrap_or(0))
        .bind(request.is_published.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating faq: {}", e)))?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateFaqRequest,
    ) -> Result<Option<Faq>, AppError> {
        let result = sqlx::query_as::<_, Faq>(
            r#"
            UPDATE faqs SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                category = COALESCE($4, category),
                sort_order = COALESCE($5, sort_order),
                is_published = COALESCE($6, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.question)
        .bind(&request.answer)
        .bind(&request.category)
        .bind(request.sort_order)
        .bind(request.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating faq: {}", e)))?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting faq: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_published(&self) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM faqs WHERE is_published = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error counting faqs: {}", e)))?;

        Ok(count)
    }
}
