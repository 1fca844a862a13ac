//! Registration and login endpoints
//!
//! Registration stores an argon2id hash; login verifies it. There are
//! no session tokens: a successful login just hands back the user id.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::db::repos::users::{NewProfile, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{EmailAddress, ValidationError};

/// Registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
}

/// Registration response
#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
}

/// POST /register - create an account
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let email = EmailAddress::new(&req.email)?;
    if req.password.is_empty() {
        return Err(ValidationError::Empty { field: "password" }.into());
    }

    let hash = password::hash_password(&req.password).map_err(|e| ApiError::Internal {
        message: format!("password hashing failed: {e}"),
    })?;

    let user_id = UserRepo::new(&state.pool)
        .create(
            &email,
            &hash,
            NewProfile {
                name: req.name,
                phone: req.phone,
                position: req.position,
                company_name: req.company_name,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

/// POST /login - verify credentials
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some((user_id, hash)) = UserRepo::new(&state.pool)
        .credentials_by_email(&req.email)
        .await?
    else {
        tracing::warn!(email = %req.email, "login attempt for unknown account");
        return Err(ApiError::Unauthorized);
    };

    let valid = password::verify_password(&req.password, &hash).map_err(|e| {
        ApiError::Internal {
            message: format!("password verification failed: {e}"),
        }
    })?;

    if !valid {
        tracing::warn!(user_id, "failed login attempt");
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(LoginResponse { user_id }))
}

/// Auth routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
