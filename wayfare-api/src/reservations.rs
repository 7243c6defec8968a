use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_core::payment::PaymentCapture;
use wayfare_core::reservation::{
    compute_total, PricingInputs, ProductKind, Reservation, ReservationStatus,
};

use crate::{error::AppError, middleware::auth::CustomerClaims, state::AppState};

#[derive(Debug, Deserialize)]
struct CreateReservationRequest {
    product_kind: ProductKind,
    product_ref: String,
    pricing: PricingInputs,
    #[serde(default)]
    details: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: Uuid,
}

#[derive(Debug, Deserialize)]
struct UpdateReservationRequest {
    status: ReservationStatus,
}

#[derive(Debug, Serialize)]
struct PayResponse {
    reservation: Reservation,
    capture: PaymentCapture,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/reservations", get(list_reservations).post(create_reservation))
        .route(
            "/v1/reservations/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .route("/v1/reservations/{id}/pay", post(pay_reservation))
}

fn owner_id(claims: &CustomerClaims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid subject claim".to_string()))
}

/// Fetch a reservation and verify the caller owns it.
async fn owned_reservation(
    state: &AppState,
    claims: &CustomerClaims,
    id: Uuid,
) -> Result<Reservation, AppError> {
    let user_id = owner_id(claims)?;

    let reservation = state
        .reservations
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Reservation not found".to_string()))?;

    if reservation.user_id != user_id {
        return Err(AppError::AuthorizationError(
            "Reservation does not belong to you".to_string(),
        ));
    }

    Ok(reservation)
}

/// POST /v1/reservations
/// The total is computed here, once, from the submitted pricing inputs and
/// the configured tax rate, then stored. Nothing ever recomputes it.
async fn create_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let user_id = owner_id(&claims)?;

    if req.pricing.duration == 0 || req.pricing.party_size == 0 {
        return Err(AppError::ValidationError(
            "duration and party_size must be positive".to_string(),
        ));
    }

    let total_price = compute_total(&req.pricing, state.business_rules.tax_rate);

    let reservation = Reservation::new(
        user_id,
        req.product_kind,
        req.product_ref,
        total_price,
        req.details,
    );
    state.reservations.create(&reservation).await?;

    tracing::info!(reservation_id = %reservation.id, total_price, "created reservation");

    Ok((StatusCode::CREATED, Json(reservation)))
}

async fn list_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let user_id = owner_id(&claims)?;
    let reservations = state.reservations.list_for_user(user_id).await?;
    Ok(Json(reservations))
}

async fn get_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = owned_reservation(&state, &claims, id).await?;
    Ok(Json(reservation))
}

/// PUT /v1/reservations/{id}
/// Status is the only mutable field; price fields are frozen at creation.
async fn update_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    owned_reservation(&state, &claims, id).await?;

    let updated = state
        .reservations
        .update_status(id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Reservation not found".to_string()))?;

    Ok(Json(updated))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    owned_reservation(&state, &claims, id).await?;

    let deleted = state
        .reservations
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Reservation not found".to_string()))?;

    Ok(Json(DeletedResponse { deleted }))
}

/// POST /v1/reservations/{id}/pay
/// Capture the frozen total through the payment adapter and mark paid.
async fn pay_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayResponse>, AppError> {
    let reservation = owned_reservation(&state, &claims, id).await?;

    let capture = state
        .payments
        .capture(reservation.id, reservation.total_price)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Payment capture failed: {}", e)))?;

    let updated = state
        .reservations
        .update_status(id, ReservationStatus::Paid)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Reservation not found".to_string()))?;

    Ok(Json(PayResponse {
        reservation: updated,
        capture,
    }))
}
