//! Business card endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::cards::{BusinessCard, CardRepo, CardUpdate, NewCard};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::models::{EmailAddress, ValidationError};

/// Card creation request
#[derive(Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub social_media_link: Option<String>,
}

/// Card creation response
#[derive(Serialize)]
pub struct CreateCardResponse {
    pub card_id: i64,
}

/// Partial card update request
#[derive(Deserialize)]
pub struct UpdateCardRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_media_link: Option<String>,
}

/// Update confirmation
#[derive(Serialize)]
pub struct UpdateCardResponse {
    pub message: &'static str,
}

/// Card response
#[derive(Serialize)]
pub struct CardResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub position: String,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub social_media_link: Option<String>,
    pub qr_code_data: String,
    pub created_at: String,
}

impl From<BusinessCard> for CardResponse {
    fn from(c: BusinessCard) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            position: c.position,
            company_name: c.company_name,
            phone: c.phone,
            email: c.email,
            social_media_link: c.social_media_link,
            qr_code_data: c.qr_code_data,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// POST /business-cards - create a card
async fn create_card(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CreateCardResponse>), ApiError> {
    if req.name.is_empty() {
        return Err(ValidationError::Empty { field: "name" }.into());
    }
    let email = EmailAddress::new(&req.email)?;

    let card_id = CardRepo::new(&state.pool)
        .create(
            user_id,
            NewCard {
                name: req.name,
                email: email.into_string(),
                position: req.position,
                company_name: req.company_name,
                phone: req.phone,
                social_media_link: req.social_media_link,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreateCardResponse { card_id })))
}

/// PUT /business-cards/{id} - partial card update
async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<Json<UpdateCardResponse>, ApiError> {
    let email = req.email.as_deref().map(EmailAddress::new).transpose()?;

    CardRepo::new(&state.pool)
        .update(
            id,
            CardUpdate {
                name: req.name,
                position: req.position,
                company_name: req.company_name,
                phone: req.phone,
                email: email.map(EmailAddress::into_string),
                social_media_link: req.social_media_link,
            },
        )
        .await?;

    Ok(Json(UpdateCardResponse {
        message: "card updated",
    }))
}

/// GET /business-cards/{user_id} - list cards owned by a user
///
/// The path segment is a user id here but a card id for PUT; the wire
/// protocol inherited that asymmetry and clients depend on it.
async fn list_cards(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = CardRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// Business card routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/business-cards", post(create_card))
        .route("/business-cards/{id}", get(list_cards).put(update_card))
}
