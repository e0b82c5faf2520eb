use axum::Json;
use serde_json::{Value, json};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
