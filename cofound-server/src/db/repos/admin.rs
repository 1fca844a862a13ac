//! Admin reset repository
//!
//! Development-only bulk delete. Tables are cleared child-first so no
//! foreign key is left dangling: favorites, then the post tree, then
//! companies, cards, subscriptions and finally users.

use sqlx::SqlitePool;
use tracing::info;

use super::DbError;

/// Per-table flags for the reset operation
#[derive(Debug, Clone, Copy)]
pub struct ResetFlags {
    pub drop_users: bool,
    pub drop_cards: bool,
    pub drop_companies: bool,
    pub drop_posts: bool,
    pub drop_favorites: bool,
    pub drop_subscriptions: bool,
}

/// Admin repository
pub struct AdminRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Clear tables selected by `flags`, all in one transaction.
    pub async fn reset(&self, flags: ResetFlags) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        let mut deleted: u64 = 0;

        if flags.drop_favorites {
            deleted += sqlx::query("DELETE FROM favorite_cards")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            deleted += sqlx::query("DELETE FROM favorite_companies")
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        if flags.drop_posts {
            deleted += sqlx::query("DELETE FROM likes")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            deleted += sqlx::query("DELETE FROM comments")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            deleted += sqlx::query("DELETE FROM posts")
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        if flags.drop_companies {
            deleted += sqlx::query("DELETE FROM companies")
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        if flags.drop_cards {
            deleted += sqlx::query("DELETE FROM business_cards")
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        if flags.drop_subscriptions {
            deleted += sqlx::query("DELETE FROM subscriptions")
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        if flags.drop_users {
            deleted += sqlx::query("DELETE FROM users")
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        info!(rows = deleted, "admin reset complete");
        Ok(())
    }
}
