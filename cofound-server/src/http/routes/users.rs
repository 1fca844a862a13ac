//! User profile endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::users::{ProfileUpdate, User, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::EmailAddress;

/// User profile response (never includes the password hash)
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            phone: u.phone,
            position: u.position,
            company_name: u.company_name,
            avatar_url: u.avatar_url,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Partial profile update request
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Update confirmation
#[derive(Serialize)]
pub struct UpdateUserResponse {
    pub message: &'static str,
}

/// GET /users - list all users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id} - partial profile update
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ApiError> {
    let email = req.email.as_deref().map(EmailAddress::new).transpose()?;

    UserRepo::new(&state.pool)
        .update(
            id,
            ProfileUpdate {
                email,
                name: req.name,
                phone: req.phone,
                position: req.position,
                company_name: req.company_name,
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(Json(UpdateUserResponse {
        message: "user updated",
    }))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).put(update_user))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::http::server::test_app::{app, json_body, send};

    #[tokio::test]
    async fn email_collision_on_update_is_conflict() {
        let app = app().await;

        send(
            &app,
            "POST",
            "/register",
            Some(json!({ "email": "taken@cofound.app", "password": "secretsecret" })),
        )
        .await;
        let response = send(
            &app,
            "POST",
            "/register",
            Some(json!({ "email": "mine@cofound.app", "password": "secretsecret" })),
        )
        .await;
        let target = json_body(response).await["user_id"].as_i64().unwrap();

        let response = send(
            &app,
            "PUT",
            &format!("/users/{target}"),
            Some(json!({ "email": "taken@cofound.app" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // Target row is unchanged
        let response = send(&app, "GET", &format!("/users/{target}"), None).await;
        assert_eq!(json_body(response).await["email"], "mine@cofound.app");
    }

    #[tokio::test]
    async fn get_unknown_user_is_404() {
        let app = app().await;
        let response = send(&app, "GET", "/users/999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_users_hides_password_hash() {
        let app = app().await;
        send(
            &app,
            "POST",
            "/register",
            Some(json!({ "email": "visible@cofound.app", "password": "secretsecret" })),
        )
        .await;

        let response = send(&app, "GET", "/users", None).await;
        let users = json_body(response).await;
        assert_eq!(users.as_array().unwrap().len(), 1);
        assert!(users[0].get("password_hash").is_none());
    }
}
