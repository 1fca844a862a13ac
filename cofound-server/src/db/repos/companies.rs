//! Company repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{DbError, UserRepo};

/// Company record from database
#[derive(Debug, Clone, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub location: String,
    pub logo_url: Option<String>,
    pub employee_count: i64,
    pub contact_email: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields for company creation
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub location: String,
    pub logo_url: Option<String>,
    pub employee_count: i64,
    pub contact_email: String,
}

/// Company repository
pub struct CompanyRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a company owned by `created_by`. Returns the generated id.
    pub async fn create(&self, created_by: i64, company: NewCompany) -> Result<i64, DbError> {
        if !UserRepo::new(self.pool).exists(created_by).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: created_by,
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO companies
                (name, description, industry, location, logo_url, employee_count, contact_email, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.industry)
        .bind(&company.location)
        .bind(company.logo_url.as_deref())
        .bind(company.employee_count)
        .bind(&company.contact_email)
        .bind(created_by)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all companies.
    pub async fn list(&self) -> Result<Vec<Company>, DbError> {
        let companies: Vec<Company> = sqlx::query_as(
            r#"
            SELECT id, name, description, industry, location, logo_url,
                   employee_count, contact_email, created_by, created_at
            FROM companies
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(companies)
    }

    /// Get a single company by id.
    pub async fn get(&self, id: i64) -> Result<Company, DbError> {
        let company: Option<Company> = sqlx::query_as(
            r#"
            SELECT id, name, description, industry, location, logo_url,
                   employee_count, contact_email, created_by, created_at
            FROM companies
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        company.ok_or(DbError::NotFound {
            resource: "company",
            id,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_company(name: &str) -> NewCompany {
    NewCompany {
        name: name.to_owned(),
        description: "Seed-stage logistics startup".into(),
        industry: "logistics".into(),
        location: "Berlin".into(),
        logo_url: None,
        employee_count: 12,
        contact_email: "hello@example.com".into(),
    }
}
