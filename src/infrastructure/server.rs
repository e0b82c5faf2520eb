// Server module - Provides reusable HTTP server functionality
// Used by the binary (main.rs) and by the integration tests

use axum::{Router, http::HeaderValue, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;
use crate::infrastructure::config::Config;

/// Build the full application router with database connection
pub fn build_router(db: DatabaseConnection) -> Router {
    build_router_with_state(AppState::new(db), &[])
}

/// Build the full application router around an existing state
pub fn build_router_with_state(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(api::health::health_check))
        .nest("/api", api::api_router_with_state(state))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_allowed_origins))
}

/// Any origin when none are configured, otherwise only the listed ones
fn cors_layer(cors_allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let mut origins = Vec::new();
    for origin in cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    cors.allow_origin(origins)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &Config, db: DatabaseConnection) -> std::io::Result<()> {
    let app = build_router_with_state(AppState::new(db), &config.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Bookshelf server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
