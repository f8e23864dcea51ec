use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tracing::{error, info};

use beatstore_backend::cache::{CacheManager, ContentCache, RedisStore};
use beatstore_backend::config::environment::{cache_config_from_env, EnvironmentConfig};
use beatstore_backend::database;
use beatstore_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use beatstore_backend::routes;
use beatstore_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🎧 Beat Store - API de contenido");
    info!("================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar Redis y cache. El store se construye una sola vez y
    // vive inyectado en el manager durante todo el proceso.
    let cache_config = cache_config_from_env();
    let redis_store = match RedisStore::connect(&cache_config).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let cache_manager = CacheManager::new(Arc::new(redis_store), cache_config);
    let content_cache = ContentCache::new(cache_manager);

    // Crear router de la API
    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone(), content_cache);

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/faq", routes::faq_routes::create_faq_router())
        .nest("/api/beats", routes::beat_routes::create_beat_router())
        .nest("/api/content", routes::content_routes::create_content_router())
        .nest("/api/admin", routes::admin_routes::create_admin_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🎵 Endpoints de catálogo:");
    info!("   GET  /api/beats - Listar beats");
    info!("   GET  /api/beats/featured - Beats destacados");
    info!("   GET  /api/beats/:id - Detalle de beat");
    info!("   PUT  /api/beats/:id - Actualizar beat (admin)");
    info!("   DELETE /api/beats/:id - Eliminar beat (admin)");
    info!("❓ Endpoints de FAQ:");
    info!("   GET  /api/faq - Listar FAQs");
    info!("   POST /api/faq - Crear FAQ (admin)");
    info!("   PUT  /api/faq/:id - Actualizar FAQ (admin)");
    info!("   DELETE /api/faq/:id - Eliminar FAQ (admin)");
    info!("📄 Endpoints de contenido:");
    info!("   GET  /api/content/licenses - Tiers de licencia");
    info!("   GET  /api/content/privacy - Página de privacidad");
    info!("   PUT  /api/content/privacy - Actualizar privacidad (admin)");
    info!("🧰 Endpoints de administración:");
    info!("   GET  /api/admin/stats - Stats del sitio");
    info!("   GET  /api/admin/cache/stats - Stats del cache");
    info!("   POST /api/admin/cache - Acciones sobre el cache");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check con el estado de la conexión al cache
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let cache_connected = state.cache.manager().is_connected().await;

    Json(json!({
        "status": "ok",
        "cache_connected": cache_connected,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
