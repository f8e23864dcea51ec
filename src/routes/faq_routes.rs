use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::faq_controller::FaqController;
use crate::dto::ApiResponse;
use crate::models::faq::{CreateFaqRequest, Faq, FaqListResponse, UpdateFaqRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct FaqListQuery {
    pub category: Option<String>,
    pub language: Option<String>,
    pub page: Option<i64>,
}

pub fn create_faq_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faqs).post(create_faq))
        .route("/:id", put(update_faq).delete(delete_faq))
}

async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<FaqListQuery>,
) -> Result<Json<FaqListResponse>, AppError> {
    let controller = FaqController::new(state.pool.clone(), state.cache.clone());
    let response = controller
        .list(query.category, query.language, query.page)
        .await?;
    Ok(Json(response))
}

async fn create_faq(
    State(state): State<AppState>,
    Json(request): Json<CreateFaqRequest>,
) -> Result<Json<ApiResponse<Faq>>, AppError> {
    let controller = FaqController::new(state.pool.clone(), state.cache.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFaqRequest>,
) -> Result<Json<ApiResponse<Faq>>, AppError> {
    let controller = FaqController::new(state.pool.clone(), state.cache.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FaqController::new(state.pool.clone(), state.cache.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
