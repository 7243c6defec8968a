use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use wayfare_core::inventory::{NewVehicle, Vehicle, VehicleFilter, VehiclePatch};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/v1/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state.vehicles.list(&filter).await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .vehicles
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Vehicle not found".to_string()))?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(req): Json<NewVehicle>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = state.vehicles.create(&req).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<VehiclePatch>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .vehicles
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Vehicle not found".to_string()))?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = state
        .vehicles
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Vehicle not found".to_string()))?;
    Ok(Json(DeletedResponse { deleted }))
}
