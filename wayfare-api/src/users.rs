use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_core::user::{ProfileUpdate, User};
use wayfare_shared::pii::Masked;

use crate::{error::AppError, middleware::auth::CustomerClaims, state::AppState};

#[derive(Debug, Serialize)]
struct ProfileResponse {
    id: String,
    username: String,
    email: Masked<String>,
    full_name: Option<String>,
    role: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: Masked(user.email),
            full_name: user.full_name,
            role: user.role,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    email: Option<String>,
    full_name: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/users/me", get(get_profile).put(update_profile))
}

fn subject_id(claims: &CustomerClaims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid subject claim".to_string()))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
) -> Result<Json<ProfileResponse>, AppError> {
    let id = subject_id(&claims)?;

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Account not found".to_string()))?;

    Ok(Json(user.into()))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let id = subject_id(&claims)?;

    let patch = ProfileUpdate {
        email: req.email,
        full_name: req.full_name,
    };

    let user = state
        .users
        .update_profile(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Account not found".to_string()))?;

    Ok(Json(user.into()))
}
