use crate::models::beat::{Beat, BeatListResponse, UpdateBeatRequest};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BeatRepository {
    pool: PgPool,
}

impl BeatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listar beats publicados con filtro opcional de género y paginación
    pub async fn list(
        &self,
        genre: Option<&str>,
        page: i64,
        per_page: i64,
    ) -> Result<BeatListResponse, AppError> {
        let offset = (page - 1) * per_page;

        let (beats, total_count) = if let Some(genre) = genre {
            let beats = sqlx::query_as::<_, Beat>(
                r#"
                SELECT * FROM beats
                WHERE is_published = TRUE AND genre = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(genre)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing beats: {}", e)))?;

            let (total_count,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM beats WHERE is_published = TRUE AND genre = $1",
            )
            .bind(genre)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error counting beats: {}", e)))?;

            (beats, total_count)
        } else {
            let beats = sqlx::query_as::<_, Beat>(
                r#"
                SELECT * FROM beats
                WHERE is_published = TRUE
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing beats: {}", e)))?;

            let (total_count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM beats WHERE is_published = TRUE")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| AppError::Database(format!("Error counting beats: {}", e)))?;

            (beats, total_count)
        };

        Ok(BeatListResponse {
            beats,
            total_count,
            page,
            per_page,
        })
    }

    /// Beats destacados para la portada
    pub async fn featured(&self) -> Result<Vec<Beat>, AppError> {
        let beats = sqlx::query_as::<_, Beat>(
            r#"
            SELECT * FROM beats
            WHERE is_published = TRUE AND is_featured = TRUE
            ORDER BY created_at DESC
            LIMIT 12
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing featured beats: {}", e)))?;

        Ok(beats)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Beat>, AppError> {
        let result = sqlx::query_as::<_, Beat>("SELECT * FROM beats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding beat: {}", e)))?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateBeatRequest,
    ) -> Result<Option<Beat>, AppError> {
        let result = sqlx::query_as::<_, Beat>(
            r#"
            UPDATE beats SET
                title = COALESCE($2, title),
                genre = COALESCE($3, genre),
                bpm = COALESCE($4, bpm),
                price_basic = COALESCE($5, price_basic),
                price_premium = COALESCE($6, price_premium),
                price_exclusive = COALESCE($7, price_exclusive),
                cover_url = COALESCE($8, cover_url),
                preview_url = COALESCE($9, preview_url),
                is_featured = COALESCE($10, is_featured),
                is_published = COALESCE($11, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.genre)
        .bind(request.bpm)
        .bind(request.price_basic)
        .bind(request.price_premium)
        .bind(request.price_exclusive)
        .bind(&request.cover_url)
        .bind(&request.preview_url)
        .bind(request.is_featured)
        .bind(request.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating beat: {}", e)))?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM beats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting beat: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_published(&self) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM beats WHERE is_published = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error counting beats: {}", e)))?;

        Ok(count)
    }
}
