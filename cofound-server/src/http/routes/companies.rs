//! Company endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::companies::{Company, CompanyRepo, NewCompany};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Company creation request
#[derive(Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub location: String,
    pub logo_url: Option<String>,
    pub employee_count: i64,
    pub contact_email: String,
}

/// Company creation response
#[derive(Serialize)]
pub struct CreateCompanyResponse {
    pub company_id: i64,
}

/// Company response
#[derive(Serialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub location: String,
    pub logo_url: Option<String>,
    pub employee_count: i64,
    pub contact_email: String,
    pub created_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            industry: c.industry,
            location: c.location,
            logo_url: c.logo_url,
            employee_count: c.employee_count,
            contact_email: c.contact_email,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// POST /companies - create a company
async fn create_company(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CreateCompanyResponse>), ApiError> {
    if req.name.is_empty() {
        return Err(ValidationError::Empty { field: "name" }.into());
    }

    let company_id = CompanyRepo::new(&state.pool)
        .create(
            user_id,
            NewCompany {
                name: req.name,
                description: req.description,
                industry: req.industry,
                location: req.location,
                logo_url: req.logo_url,
                employee_count: req.employee_count,
                contact_email: req.contact_email,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreateCompanyResponse { company_id })))
}

/// GET /companies - list all companies
async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyResponse>>, ApiError> {
    let companies = CompanyRepo::new(&state.pool).list().await?;
    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

/// GET /companies/{id} - get a single company
async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = CompanyRepo::new(&state.pool).get(id).await?;
    Ok(Json(CompanyResponse::from(company)))
}

/// Company routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/{id}", get(get_company))
}
