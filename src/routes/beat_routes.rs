use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::beat_controller::BeatController;
use crate::dto::ApiResponse;
use crate::models::beat::{Beat, BeatListResponse, UpdateBeatRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct BeatListQuery {
    pub genre: Option<String>,
    pub page: Option<i64>,
}

pub fn create_beat_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_beats))
        .route("/featured", get(featured_beats))
        .route("/:id", get(get_beat).put(update_beat).delete(delete_beat))
}

async fn list_beats(
    State(state): State<AppState>,
    Query(query): Query<BeatListQuery>,
) -> Result<Json<BeatListResponse>, AppError> {
    let controller = BeatController::new(state.pool.clone(), state.cache.clone());
    let response = controller.list(query.genre, query.page).await?;
    Ok(Json(response))
}

async fn featured_beats(State(state): State<AppState>) -> Result<Json<Vec<Beat>>, AppError> {
    let controller = BeatController::new(state.pool.clone(), state.cache.clone());
    let beats = controller.featured().await?;
    Ok(Json(beats))
}

async fn get_beat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Beat>, AppError> {
    let controller = BeatController::new(state.pool.clone(), state.cache.clone());
    let beat = controller.get(id).await?;
    Ok(Json(beat))
}

async fn update_beat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBeatRequest>,
) -> Result<Json<ApiResponse<Beat>>, AppError> {
    let controller = BeatController::new(state.pool.clone(), state.cache.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_beat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BeatController::new(state.pool.clone(), state.cache.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
