use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use wayfare_core::inventory::{Flight, FlightFilter, FlightPatch, NewFlight};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights).post(create_flight))
        .route(
            "/v1/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
}

async fn list_flights(
    State(state): State<AppState>,
    Query(filter): Query<FlightFilter>,
) -> Result<Json<Vec<Flight>>, AppError> {
    let flights = state.flights.list(&filter).await?;
    Ok(Json(flights))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Flight>, AppError> {
    let flight = state
        .flights
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))?;
    Ok(Json(flight))
}

async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<NewFlight>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let flight = state.flights.create(&req).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FlightPatch>,
) -> Result<Json<Flight>, AppError> {
    let flight = state
        .flights
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))?;
    Ok(Json(flight))
}

async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = state
        .flights
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))?;
    Ok(Json(DeletedResponse { deleted }))
}
