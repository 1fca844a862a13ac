//! Admin reset endpoint (development only)
//!
//! Bulk-deletes whole tables by flag. No confirmation, no audit trail;
//! do not expose this route on anything resembling production.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{AdminRepo, ResetFlags};
use crate::http::error::ApiError;
use crate::http::server::AppState;

fn default_true() -> bool {
    true
}

/// Reset request; users and cards are opt-in, the rest opt-out
#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub drop_users: bool,
    #[serde(default)]
    pub drop_cards: bool,
    #[serde(default = "default_true")]
    pub drop_companies: bool,
    #[serde(default = "default_true")]
    pub drop_posts: bool,
    #[serde(default = "default_true")]
    pub drop_favorites: bool,
    #[serde(default = "default_true")]
    pub drop_subscriptions: bool,
}

/// Reset confirmation
#[derive(Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
}

/// POST /admin/reset - clear tables per flags
async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, ApiError> {
    AdminRepo::new(&state.pool)
        .reset(ResetFlags {
            drop_users: req.drop_users,
            drop_cards: req.drop_cards,
            drop_companies: req.drop_companies,
            drop_posts: req.drop_posts,
            drop_favorites: req.drop_favorites,
            drop_subscriptions: req.drop_subscriptions,
        })
        .await?;

    Ok(Json(ResetResponse {
        message: "data cleared",
    }))
}

/// Admin routes
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/reset", post(reset))
}
