use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state
        .store_health
        .ping()
        .await
        .map_err(|e| AppError::InternalServerError(format!("Store unreachable: {}", e)))?;

    Ok(Json(json!({ "status": "ok" })))
}
