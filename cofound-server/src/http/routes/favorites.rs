//! Favorites endpoints (business cards and companies)
//!
//! Adding an existing favorite is not an error; the response says
//! "already in favorites" and no second row is created.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::FavoriteRepo;
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::routes::cards::CardResponse;
use crate::http::routes::companies::CompanyResponse;
use crate::http::server::AppState;

/// Favorite-card request
#[derive(Deserialize)]
pub struct AddFavoriteCardRequest {
    pub business_card_id: i64,
}

/// Favorite-company request
#[derive(Deserialize)]
pub struct AddFavoriteCompanyRequest {
    pub company_id: i64,
}

/// Favorite confirmation
#[derive(Serialize)]
pub struct FavoriteResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_id: Option<i64>,
}

#[derive(Deserialize)]
struct RemoveCardParams {
    business_card_id: i64,
}

#[derive(Deserialize)]
struct RemoveCompanyParams {
    company_id: i64,
}

/// POST /favorites - save a business card
async fn add_favorite_card(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<AddFavoriteCardRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
    match FavoriteRepo::new(&state.pool)
        .add_card(user_id, req.business_card_id)
        .await?
    {
        Some(favorite_id) => Ok((
            StatusCode::CREATED,
            Json(FavoriteResponse {
                message: "added to favorites",
                favorite_id: Some(favorite_id),
            }),
        )),
        None => Ok((
            StatusCode::OK,
            Json(FavoriteResponse {
                message: "already in favorites",
                favorite_id: None,
            }),
        )),
    }
}

/// GET /favorites/{user_id} - cards a user has saved
async fn list_favorite_cards(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = FavoriteRepo::new(&state.pool).list_cards(user_id).await?;
    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// DELETE /favorites - remove a saved card
async fn remove_favorite_card(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<RemoveCardParams>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    FavoriteRepo::new(&state.pool)
        .remove_card(user_id, params.business_card_id)
        .await?;

    Ok(Json(FavoriteResponse {
        message: "removed from favorites",
        favorite_id: None,
    }))
}

/// POST /company-favorites - save a company
async fn add_favorite_company(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<AddFavoriteCompanyRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
    match FavoriteRepo::new(&state.pool)
        .add_company(user_id, req.company_id)
        .await?
    {
        Some(favorite_id) => Ok((
            StatusCode::CREATED,
            Json(FavoriteResponse {
                message: "added to favorites",
                favorite_id: Some(favorite_id),
            }),
        )),
        None => Ok((
            StatusCode::OK,
            Json(FavoriteResponse {
                message: "already in favorites",
                favorite_id: None,
            }),
        )),
    }
}

/// GET /company-favorites/{user_id} - companies a user has saved
async fn list_favorite_companies(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<CompanyResponse>>, ApiError> {
    let companies = FavoriteRepo::new(&state.pool)
        .list_companies(user_id)
        .await?;
    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

/// DELETE /company-favorites - remove a saved company
async fn remove_favorite_company(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<RemoveCompanyParams>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    FavoriteRepo::new(&state.pool)
        .remove_company(user_id, params.company_id)
        .await?;

    Ok(Json(FavoriteResponse {
        message: "removed from favorites",
        favorite_id: None,
    }))
}

/// Favorites routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            post(add_favorite_card).delete(remove_favorite_card),
        )
        .route("/favorites/{user_id}", get(list_favorite_cards))
        .route(
            "/company-favorites",
            post(add_favorite_company).delete(remove_favorite_company),
        )
        .route(
            "/company-favorites/{user_id}",
            get(list_favorite_companies),
        )
}
