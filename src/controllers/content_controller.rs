use crate::cache::ContentCache;
use crate::dto::ApiResponse;
use crate::models::content::{LicenseTier, StaticPage, UpdatePageRequest};
use crate::repositories::content_repository::ContentRepository;
use crate::utils::errors::{unwrap_app_error, AppError};
use sqlx::PgPool;
use validator::Validate;

pub struct ContentController {
    repository: ContentRepository,
    cache: ContentCache,
}

impl ContentController {
    pub fn new(pool: PgPool, cache: ContentCache) -> Self {
        Self {
            repository: ContentRepository::new(pool),
            cache,
        }
    }

    /// Tiers de licencia con cache de 24 horas
    pub async fn license_tiers(&self) -> Result<Vec<LicenseTier>, AppError> {
        let repository = &self.repository;

        self.cache
            .with_license_cache(&[], move || async move {
                let tiers = repository.license_tiers().await?;
                Ok(tiers)
            })
            .await
            .map_err(unwrap_app_error)
    }

    /// Página de privacidad con cache de 24 horas
    pub async fn privacy_page(&self, language: Option<String>) -> Result<StaticPage, AppError> {
        let language = language.unwrap_or_else(|| "en".to_string());
        let repository = &self.repository;
        let fetch_language = language.clone();

        let page: Option<StaticPage> = self
            .cache
            .with_privacy_cache(&[("language", &language)], move || async move {
                let page = repository.privacy_page(&fetch_language).await?;
                Ok(page)
            })
            .await
            .map_err(unwrap_app_error)?;

        page.ok_or_else(|| {
            AppError::NotFound(format!("Privacy page not available in '{}'", language))
        })
    }

    /// Reescribir la página de privacidad e invalidar las páginas estáticas
    pub async fn update_privacy_page(
        &self,
        request: UpdatePageRequest,
    ) -> Result<ApiResponse<StaticPage>, AppError> {
        request.validate()?;

        let page = self.repository.upsert_privacy_page(&request).await?;
        self.cache.manager().invalidate_static_pages().await;

        log::info!("📄 Página de privacidad actualizada ({})", page.language);
        Ok(ApiResponse::success_with_message(
            page,
            "Página actualizada exitosamente".to_string(),
        ))
    }
}
