use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::cache::{keys, CacheDomain, CacheOptions, ContentCache};
use crate::repositories::beat_repository::BeatRepository;
use crate::repositories::content_repository::ContentRepository;
use crate::repositories::faq_repository::FaqRepository;
use crate::utils::errors::{unwrap_app_error, AppError};

/// Estadísticas agregadas del dashboard de admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStats {
    pub total_beats: i64,
    pub total_faqs: i64,
    pub total_pages: i64,
    pub generated_at: DateTime<Utc>,
}

pub struct AdminController {
    beats: BeatRepository,
    faqs: FaqRepository,
    content: ContentRepository,
    cache: ContentCache,
}

impl AdminController {
    pub fn new(pool: PgPool, cache: ContentCache) -> Self {
        Self {
            beats: BeatRepository::new(pool.clone()),
            faqs: FaqRepository::new(pool.clone()),
            content: ContentRepository::new(pool),
            cache,
        }
    }

    /// Stats del sitio con cache de 3 minutos. Son varios COUNT contra la
    /// base, por eso el dashboard no los pide nunca en frío dos veces.
    pub async fn site_stats(&self) -> Result<SiteStats, AppError> {
        let key = keys::build_key(CacheDomain::Admin, &[("view", "stats")]);

        let beats = &self.beats;
        let faqs = &self.faqs;
        let content = &self.content;

        self.cache
            .manager()
            .with_cache(
                &key,
                CacheOptions::with_ttl(CacheDomain::Admin.ttl()),
                move || async move {
                    let (total_beats, total_faqs, total_pages) = futures::join!(
                        beats.count_published(),
                        faqs.count_published(),
                        content.count_pages(),
                    );

                    Ok(SiteStats {
                        total_beats: total_beats?,
                        total_faqs: total_faqs?,
                        total_pages: total_pages?,
                        generated_at: Utc::now(),
                    })
                },
            )
            .await
            .map_err(unwrap_app_error)
    }
}
