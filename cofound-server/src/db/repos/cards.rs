//! Business card repository
//!
//! Cards are user-owned contact records, distinct from the account
//! profile. `qr_code_data` is derived from the owner's public profile
//! URL at creation time and never updated afterwards.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{DbError, UserRepo};

/// Public profile URL encoded into a card's QR code.
fn qr_profile_url(user_id: i64) -> String {
    format!("https://cofound.app/users/{user_id}")
}

/// Business card record from database
#[derive(Debug, Clone, FromRow)]
pub struct BusinessCard {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub position: String,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub social_media_link: Option<String>,
    pub qr_code_data: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for card creation; optional ones default to empty strings
#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub social_media_link: Option<String>,
}

/// Partial card update; only Some fields are applied
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_media_link: Option<String>,
}

/// Business card repository
pub struct CardRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CardRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a card owned by `user_id`. Returns the generated id.
    pub async fn create(&self, user_id: i64, card: NewCard) -> Result<i64, DbError> {
        if !UserRepo::new(self.pool).exists(user_id).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id,
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO business_cards
                (user_id, name, position, company_name, phone, email, social_media_link, qr_code_data, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&card.name)
        .bind(card.position.unwrap_or_default())
        .bind(card.company_name.unwrap_or_default())
        .bind(card.phone.unwrap_or_default())
        .bind(&card.email)
        .bind(card.social_media_link.as_deref())
        .bind(qr_profile_url(user_id))
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Apply a partial update to a card.
    pub async fn update(&self, id: i64, changes: CardUpdate) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE business_cards SET
                name = COALESCE(?, name),
                position = COALESCE(?, position),
                company_name = COALESCE(?, company_name),
                phone = COALESCE(?, phone),
                email = COALESCE(?, email),
                social_media_link = COALESCE(?, social_media_link)
            WHERE id = ?
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.position.as_deref())
        .bind(changes.company_name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.social_media_link.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "business card",
                id,
            });
        }

        Ok(())
    }

    /// List cards owned by a user.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<BusinessCard>, DbError> {
        let cards: Vec<BusinessCard> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, position, company_name, phone, email,
                   social_media_link, qr_code_data, created_at
            FROM business_cards
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;

    fn sample_card() -> NewCard {
        NewCard {
            name: "Ivan Petrov".into(),
            email: "ivan@startup.io".into(),
            position: Some("CTO".into()),
            company_name: None,
            phone: None,
            social_media_link: Some("https://linkedin.com/in/ivan".into()),
        }
    }

    #[tokio::test]
    async fn qr_data_is_profile_url() {
        let pool = test_support::pool().await;
        let owner = test_support::seed_user(&pool, "ivan@startup.io").await;
        let repo = CardRepo::new(&pool);

        repo.create(owner, sample_card()).await.unwrap();

        let cards = repo.list_for_user(owner).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0].qr_code_data,
            format!("https://cofound.app/users/{owner}")
        );
        // Unset optional fields default to empty strings
        assert_eq!(cards[0].company_name, "");
        assert_eq!(cards[0].phone, "");
    }

    #[tokio::test]
    async fn partial_update() {
        let pool = test_support::pool().await;
        let owner = test_support::seed_user(&pool, "ivan@startup.io").await;
        let repo = CardRepo::new(&pool);

        let id = repo.create(owner, sample_card()).await.unwrap();
        repo.update(
            id,
            CardUpdate {
                phone: Some("+49 30 1234".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cards = repo.list_for_user(owner).await.unwrap();
        assert_eq!(cards[0].phone, "+49 30 1234");
        assert_eq!(cards[0].position, "CTO");
    }

    #[tokio::test]
    async fn update_missing_card_is_not_found() {
        let pool = test_support::pool().await;
        let err = CardRepo::new(&pool)
            .update(9, CardUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_for_unknown_user_is_empty() {
        let pool = test_support::pool().await;
        let cards = CardRepo::new(&pool).list_for_user(12345).await.unwrap();
        assert!(cards.is_empty());
    }
}
