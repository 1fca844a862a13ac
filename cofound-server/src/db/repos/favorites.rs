//! Favorites repository
//!
//! Bookmarks for business cards and companies. Deduplication is
//! constraint-backed: UNIQUE(user_id, target) plus ON CONFLICT DO
//! NOTHING, with `rows_affected()` distinguishing "saved" from "was
//! already saved". A duplicate add is not an error.

use chrono::Utc;
use sqlx::SqlitePool;

use super::{BusinessCard, Company, DbError, UserRepo};

/// Favorites repository (cards and companies)
pub struct FavoriteRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Save a business card to a user's favorites.
    ///
    /// Returns the new favorite id, or None if the card was already saved.
    pub async fn add_card(
        &self,
        user_id: i64,
        business_card_id: i64,
    ) -> Result<Option<i64>, DbError> {
        if !UserRepo::new(self.pool).exists(user_id).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id,
            });
        }

        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM business_cards WHERE id = ?)")
                .bind(business_card_id)
                .fetch_one(self.pool)
                .await?;
        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "business card",
                id: business_card_id,
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO favorite_cards (user_id, business_card_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id, business_card_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(business_card_id)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(result.last_insert_rowid()))
        }
    }

    /// List the full card records a user has saved.
    pub async fn list_cards(&self, user_id: i64) -> Result<Vec<BusinessCard>, DbError> {
        let cards: Vec<BusinessCard> = sqlx::query_as(
            r#"
            SELECT c.id, c.user_id, c.name, c.position, c.company_name, c.phone,
                   c.email, c.social_media_link, c.qr_code_data, c.created_at
            FROM favorite_cards f
            JOIN business_cards c ON c.id = f.business_card_id
            WHERE f.user_id = ?
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(cards)
    }

    /// Remove a card from a user's favorites.
    pub async fn remove_card(&self, user_id: i64, business_card_id: i64) -> Result<(), DbError> {
        let result =
            sqlx::query("DELETE FROM favorite_cards WHERE user_id = ? AND business_card_id = ?")
                .bind(user_id)
                .bind(business_card_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "favorite",
                id: business_card_id,
            });
        }

        Ok(())
    }

    /// Save a company to a user's favorites.
    ///
    /// Returns the new favorite id, or None if the company was already saved.
    pub async fn add_company(&self, user_id: i64, company_id: i64) -> Result<Option<i64>, DbError> {
        if !UserRepo::new(self.pool).exists(user_id).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id,
            });
        }

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE id = ?)")
            .bind(company_id)
            .fetch_one(self.pool)
            .await?;
        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "company",
                id: company_id,
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO favorite_companies (user_id, company_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id, company_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(result.last_insert_rowid()))
        }
    }

    /// List the full company records a user has saved.
    pub async fn list_companies(&self, user_id: i64) -> Result<Vec<Company>, DbError> {
        let companies: Vec<Company> = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.description, c.industry, c.location, c.logo_url,
                   c.employee_count, c.contact_email, c.created_by, c.created_at
            FROM favorite_companies f
            JOIN companies c ON c.id = f.company_id
            WHERE f.user_id = ?
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(companies)
    }

    /// Remove a company from a user's favorites.
    pub async fn remove_company(&self, user_id: i64, company_id: i64) -> Result<(), DbError> {
        let result =
            sqlx::query("DELETE FROM favorite_companies WHERE user_id = ? AND company_id = ?")
                .bind(user_id)
                .bind(company_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "favorite",
                id: company_id,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::cards::{CardRepo, NewCard};
    use crate::db::repos::companies::{sample_company, CompanyRepo};
    use crate::db::test_support;

    async fn seed_card(pool: &SqlitePool, owner: i64) -> i64 {
        CardRepo::new(pool)
            .create(
                owner,
                NewCard {
                    name: "Card Owner".into(),
                    email: "owner@startup.io".into(),
                    position: None,
                    company_name: None,
                    phone: None,
                    social_media_link: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_card_favorite_is_single_row() {
        let pool = test_support::pool().await;
        let owner = test_support::seed_user(&pool, "owner@cofound.app").await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;
        let card_id = seed_card(&pool, owner).await;
        let repo = FavoriteRepo::new(&pool);

        assert!(repo.add_card(fan, card_id).await.unwrap().is_some());
        // Second add reports "already saved", not an error
        assert!(repo.add_card(fan, card_id).await.unwrap().is_none());

        assert_eq!(repo.list_cards(fan).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn favorite_unknown_card_is_not_found() {
        let pool = test_support::pool().await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;

        let err = FavoriteRepo::new(&pool)
            .add_card(fan, 31337)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                resource: "business card",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn remove_card_favorite() {
        let pool = test_support::pool().await;
        let owner = test_support::seed_user(&pool, "owner@cofound.app").await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;
        let card_id = seed_card(&pool, owner).await;
        let repo = FavoriteRepo::new(&pool);

        repo.add_card(fan, card_id).await.unwrap();
        repo.remove_card(fan, card_id).await.unwrap();
        assert!(repo.list_cards(fan).await.unwrap().is_empty());

        // Removing again is NotFound
        let err = repo.remove_card(fan, card_id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn company_favorites_round_trip() {
        let pool = test_support::pool().await;
        let owner = test_support::seed_user(&pool, "owner@cofound.app").await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;
        let company_id = CompanyRepo::new(&pool)
            .create(owner, sample_company("Freightly"))
            .await
            .unwrap();
        let repo = FavoriteRepo::new(&pool);

        assert!(repo.add_company(fan, company_id).await.unwrap().is_some());
        assert!(repo.add_company(fan, company_id).await.unwrap().is_none());

        let companies = repo.list_companies(fan).await.unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Freightly");

        repo.remove_company(fan, company_id).await.unwrap();
        assert!(repo.list_companies(fan).await.unwrap().is_empty());
    }
}
