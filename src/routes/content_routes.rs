use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::controllers::content_controller::ContentController;
use crate::dto::ApiResponse;
use crate::models::content::{LicenseTier, StaticPage, UpdatePageRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub language: Option<String>,
}

pub fn create_content_router() -> Router<AppState> {
    Router::new()
        .route("/licenses", get(license_tiers))
        .route("/privacy", get(privacy_page).put(update_privacy_page))
}

async fn license_tiers(State(state): State<AppState>) -> Result<Json<Vec<LicenseTier>>, AppError> {
    let controller = ContentController::new(state.pool.clone(), state.cache.clone());
    let tiers = controller.license_tiers().await?;
    Ok(Json(tiers))
}

async fn privacy_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<StaticPage>, AppError> {
    let controller = ContentController::new(state.pool.clone(), state.cache.clone());
    let page = controller.privacy_page(query.language).await?;
    Ok(Json(page))
}

async fn update_privacy_page(
    State(state): State<AppState>,
    Json(request): Json<UpdatePageRequest>,
) -> Result<Json<ApiResponse<StaticPage>>, AppError> {
    let controller = ContentController::new(state.pool.clone(), state.cache.clone());
    let response = controller.update_privacy_page(request).await?;
    Ok(Json(response))
}
