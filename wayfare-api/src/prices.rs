use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wayfare_core::pricing;
use wayfare_shared::{VenueKind, VenueRef};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnsurePriceRequest {
    kind: Option<String>,
    external_id: Option<i64>,
    display_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnsurePriceResponse {
    base_price: i64,
    created: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceQuery {
    kind: Option<String>,
    external_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
    base_price: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ensure-price", post(ensure_price))
        .route("/price", get(get_price))
}

/// Fields arrive as Options so a missing kind/id is a 400 with a message,
/// not a serde rejection.
fn parse_venue(kind: Option<String>, external_id: Option<i64>) -> Result<VenueRef, AppError> {
    let kind = kind.ok_or_else(|| AppError::ValidationError("kind is required".to_string()))?;
    let external_id = external_id
        .ok_or_else(|| AppError::ValidationError("externalId is required".to_string()))?;

    let kind: VenueKind = kind
        .parse()
        .map_err(|e| AppError::ValidationError(format!("{}", e)))?;

    Ok(VenueRef::new(kind, external_id))
}

/// POST /ensure-price
/// Return the venue's price, minting it exactly once if this is the first
/// caller ever to ask. Safe to call concurrently from any number of replicas.
async fn ensure_price(
    State(state): State<AppState>,
    Json(req): Json<EnsurePriceRequest>,
) -> Result<Json<EnsurePriceResponse>, AppError> {
    let venue = parse_venue(req.kind, req.external_id)?;

    let outcome =
        pricing::ensure_price(state.prices.as_ref(), &venue, req.display_name.as_deref()).await?;

    Ok(Json(EnsurePriceResponse {
        base_price: outcome.base_price(),
        created: outcome.was_created(),
    }))
}

/// GET /price?kind=&externalId=
/// Read-only: a venue nobody has ensured yet is a 404, never an implicit mint.
async fn get_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<PriceResponse>, AppError> {
    let venue = parse_venue(query.kind, query.external_id)?;

    let record = state
        .prices
        .find_price(&venue)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("No price recorded for {}", venue)))?;

    Ok(Json(PriceResponse {
        base_price: record.base_price,
    }))
}
