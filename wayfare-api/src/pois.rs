use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use wayfare_core::inventory::{NewPoi, Poi, PoiFilter, PoiPatch};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/pois", get(list_pois).post(create_poi))
        .route("/v1/pois/{id}", get(get_poi).put(update_poi).delete(delete_poi))
}

async fn list_pois(
    State(state): State<AppState>,
    Query(filter): Query<PoiFilter>,
) -> Result<Json<Vec<Poi>>, AppError> {
    let pois = state.pois.list(&filter).await?;
    Ok(Json(pois))
}

async fn get_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Poi>, AppError> {
    let poi = state
        .pois
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Poi not found".to_string()))?;
    Ok(Json(poi))
}

async fn create_poi(
    State(state): State<AppState>,
    Json(req): Json<NewPoi>,
) -> Result<(StatusCode, Json<Poi>), AppError> {
    let poi = state.pois.create(&req).await?;
    Ok((StatusCode::CREATED, Json(poi)))
}

async fn update_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PoiPatch>,
) -> Result<Json<Poi>, AppError> {
    let poi = state
        .pois
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Poi not found".to_string()))?;
    Ok(Json(poi))
}

async fn delete_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = state
        .pois
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Poi not found".to_string()))?;
    Ok(Json(DeletedResponse { deleted }))
}
