use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "unreachable"
        }
    };

    Json(json!({
        "status": "ok",
        "service": "bookshelf",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database
    }))
}
