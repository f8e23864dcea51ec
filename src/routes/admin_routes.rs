use axum::{
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::admin_controller::{AdminController, SiteStats};
use crate::controllers::cache_admin_controller::CacheAdminController;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de administración. La autorización la pone el gateway por
/// delante de /api/admin, aquí no se valida nada.
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(site_stats))
        .route("/cache", post(manage_cache))
        .route("/cache/stats", get(cache_stats))
}

async fn site_stats(State(state): State<AppState>) -> Result<Json<SiteStats>, AppError> {
    let controller = AdminController::new(state.pool.clone(), state.cache.clone());
    let stats = controller.site_stats().await?;
    Ok(Json(stats))
}

/// Dispatcher de acciones sobre el cache
async fn manage_cache(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> (StatusCode, ResponseJson<Value>) {
    let controller = CacheAdminController::new(state.pool.clone(), state.cache.clone());
    let (status, body) = controller.handle_action(payload).await;
    (status, ResponseJson(body))
}

async fn cache_stats(State(state): State<AppState>) -> ResponseJson<Value> {
    let stats = state.cache.manager().get_cache_stats().await;
    ResponseJson(serde_json::json!({
        "success": true,
        "data": stats,
    }))
}
