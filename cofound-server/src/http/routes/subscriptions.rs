//! Subscription endpoints

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::SubscriptionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::models::PlanType;

/// Subscription purchase request
#[derive(Deserialize)]
pub struct CreateSubscriptionRequest {
    pub plan_type: String,
}

/// Subscription purchase response
#[derive(Serialize)]
pub struct CreateSubscriptionResponse {
    pub subscription_id: i64,
}

/// POST /subscriptions - purchase a plan
///
/// Cancels any currently active plan for the user; the new one runs for
/// 30 days from purchase.
async fn create_subscription(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<CreateSubscriptionResponse>), ApiError> {
    let plan = PlanType::parse(&req.plan_type)?;

    let subscription_id = SubscriptionRepo::new(&state.pool)
        .create(user_id, plan)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSubscriptionResponse { subscription_id }),
    ))
}

/// Subscription routes
pub fn router() -> Router<AppState> {
    Router::new().route("/subscriptions", post(create_subscription))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::http::server::test_app::{app, json_body, send};

    #[tokio::test]
    async fn unknown_plan_is_validation_error() {
        let app = app().await;

        let response = send(
            &app,
            "POST",
            "/register",
            Some(json!({ "email": "payer@cofound.app", "password": "secretsecret" })),
        )
        .await;
        let user_id = json_body(response).await["user_id"].as_i64().unwrap();

        let response = send(
            &app,
            "POST",
            &format!("/subscriptions?user_id={user_id}"),
            Some(json!({ "plan_type": "platinum" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn purchase_returns_id() {
        let app = app().await;

        let response = send(
            &app,
            "POST",
            "/register",
            Some(json!({ "email": "payer@cofound.app", "password": "secretsecret" })),
        )
        .await;
        let user_id = json_body(response).await["user_id"].as_i64().unwrap();

        let response = send(
            &app,
            "POST",
            &format!("/subscriptions?user_id={user_id}"),
            Some(json!({ "plan_type": "corporate" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(json_body(response).await["subscription_id"].is_i64());
    }
}
