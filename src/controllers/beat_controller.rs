use crate::cache::ContentCache;
use crate::dto::ApiResponse;
use crate::models::beat::{Beat, BeatListResponse, UpdateBeatRequest};
use crate::repositories::beat_repository::BeatRepository;
use crate::utils::errors::{not_found_error, unwrap_app_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const BEATS_PER_PAGE: i64 = 24;

pub struct BeatController {
    repository: BeatRepository,
    cache: ContentCache,
}

impl BeatController {
    pub fn new(pool: PgPool, cache: ContentCache) -> Self {
        Self {
            repository: BeatRepository::new(pool),
            cache,
        }
    }

    /// Listar beats con cache read-through de 5 minutos
    pub async fn list(
        &self,
        genre: Option<String>,
        page: Option<i64>,
    ) -> Result<BeatListResponse, AppError> {
        let page = page.unwrap_or(1).max(1);
        let page_param = page.to_string();

        let mut params: Vec<(&str, &str)> = vec![("page", page_param.as_str())];
        if let Some(ref genre) = genre {
            params.push(("genre", genre.as_str()));
        }

        let repository = &self.repository;
        let fetch_genre = genre.clone();

        self.cache
            .with_beat_cache(&params, move || async move {
                let response = repository
                    .list(fetch_genre.as_deref(), page, BEATS_PER_PAGE)
                    .await?;
                Ok(response)
            })
            .await
            .map_err(unwrap_app_error)
    }

    /// Beats destacados de la portada
    pub async fn featured(&self) -> Result<Vec<Beat>, AppError> {
        let repository = &self.repository;

        self.cache
            .with_beat_cache(&[("view", "featured")], move || async move {
                let beats = repository.featured().await?;
                Ok(beats)
            })
            .await
            .map_err(unwrap_app_error)
    }

    /// Detalle de un beat
    pub async fn get(&self, id: Uuid) -> Result<Beat, AppError> {
        let id_param = id.to_string();
        let repository = &self.repository;

        let beat: Option<Beat> = self
            .cache
            .with_beat_cache(&[("id", &id_param)], move || async move {
                let beat = repository.find_by_id(id).await?;
                Ok(beat)
            })
            .await
            .map_err(unwrap_app_error)?;

        beat.ok_or_else(|| not_found_error("Beat", &id_param))
    }

    /// Actualizar un beat e invalidar su dominio en el cache
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateBeatRequest,
    ) -> Result<ApiResponse<Beat>, AppError> {
        request.validate()?;

        let beat = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Beat", &id.to_string()))?;

        self.cache
            .manager()
            .invalidate_beat_cache(&id.to_string())
            .await;

        log::info!("🎵 Beat actualizado: {}", id);
        Ok(ApiResponse::success_with_message(
            beat,
            "Beat actualizado exitosamente".to_string(),
        ))
    }

    /// Borrar un beat e invalidar su dominio en el cache
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(not_found_error("Beat", &id.to_string()));
        }

        self.cache
            .manager()
            .invalidate_beat_cache(&id.to_string())
            .await;

        log::info!("🗑️ Beat eliminado: {}", id);
        Ok(ApiResponse::message("Beat eliminado exitosamente".to_string()))
    }
}
