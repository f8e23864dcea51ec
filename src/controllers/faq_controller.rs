use crate::cache::ContentCache;
use crate::dto::ApiResponse;
use crate::models::faq::{CreateFaqRequest, Faq, FaqListResponse, UpdateFaqRequest};
use crate::repositories::faq_repository::FaqRepository;
use crate::utils::errors::{not_found_error, unwrap_app_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const FAQS_PER_PAGE: i64 = 20;

pub struct FaqController {
    repository: FaqRepository,
    cache: ContentCache,
}

impl FaqController {
    pub fn new(pool: PgPool, cache: ContentCache) -> Self {
        Self {
            repository: FaqRepository::new(pool),
            cache,
        }
    }

    /// Listar FAQs con cache read-through de 12 horas
    pub async fn list(
        &self,
        category: Option<String>,
        language: Option<String>,
        page: Option<i64>,
    ) -> Result<FaqListResponse, AppError> {
        let language = language.unwrap_or_else(|| "en".to_string());
        let page = page.unwrap_or(1).max(1);
        let page_param = page.to_string();

        // la clave solo lleva los parámetros presentes en el request
        let mut params: Vec<(&str, &str)> =
            vec![("language", language.as_str()), ("page", page_param.as_str())];
        if let Some(ref category) = category {
            params.push(("category", category.as_str()));
        }

        let repository = &self.repository;
        let fetch_category = category.clone();
        let fetch_language = language.clone();

        self.cache
            .with_faq_cache(&params, move || async move {
                let response = repository
                    .list(fetch_category.as_deref(), &fetch_language, page, FAQS_PER_PAGE)
                    .await?;
                Ok(response)
            })
            .await
            .map_err(unwrap_app_error)
    }

    /// Crear una FAQ e invalidar el dominio completo en el cache
    pub async fn create(&self, request: CreateFaqRequest) -> Result<ApiResponse<Faq>, AppError> {
        request.validate()?;

        let faq = self.repository.create(&request).await?;
        self.cache.manager().invalidate_faq().await;

        log::info!("📝 FAQ creada: {}", faq.id);
        Ok(ApiResponse::success_with_message(
            faq,
            "FAQ creada exitosamente".to_string(),
        ))
    }

    /// Actualizar una FAQ e invalidar el dominio completo en el cache
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateFaqRequest,
    ) -> Result<ApiResponse<Faq>, AppError> {
        request.validate()?;

        let faq = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("FAQ", &id.to_string()))?;

        self.cache.manager().invalidate_faq().await;

        log::info!("📝 FAQ actualizada: {}", id);
        Ok(ApiResponse::success_with_message(
            faq,
            "FAQ actualizada exitosamente".to_string(),
        ))
    }

    /// Borrar una FAQ e invalidar el dominio completo en el cache
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(not_found_error("FAQ", &id.to_string()));
        }

        self.cache.manager().invalidate_faq().await;

        log::info!("🗑️ FAQ eliminada: {}", id);
        Ok(ApiResponse::message("FAQ eliminada exitosamente".to_string()))
    }
}
