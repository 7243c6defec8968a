use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use wayfare_core::user::User;
use wayfare_core::StoreError;
use wayfare_shared::pii::Masked;

use crate::{error::AppError, middleware::auth::CustomerClaims, state::AppState};

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    id: String,
    username: String,
    email: Masked<String>,
    full_name: Option<String>,
    role: String,
}

impl From<User> for UserResponse {
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
struct LoginRequest {
    /// Username or email.
    identifier: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: UserResponse,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let username = req
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::ValidationError("username is required".to_string()))?;
    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::ValidationError("email is required".to_string()))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::ValidationError("password is required".to_string()))?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?
        .to_string();

    let mut user = User::new(username, email, password_hash);
    user.full_name = req.full_name;

    match state.users.insert(&user).await {
        Ok(()) => {}
        Err(StoreError::Duplicate) => {
            return Err(AppError::ConflictError("Account already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id = %user.id, "registered new account");

    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let identifier = req
        .identifier
        .filter(|i| !i.is_empty())
        .ok_or_else(|| AppError::ValidationError("identifier is required".to_string()))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::ValidationError("password is required".to_string()))?;

    // Same generic response for an unknown account and a wrong password, so
    // the endpoint does not leak which usernames exist.
    let invalid = || AppError::AuthenticationError("Invalid credentials".to_string());

    let user = state
        .users
        .find_by_identifier(&identifier)
        .await?
        .ok_or_else(invalid)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Stored hash is malformed: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| invalid())?;

    let claims = CustomerClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
