//! Post repository
//!
//! Feed posts plus the like operation. `likes_count` is denormalized on
//! the post row; the like insert and the counter bump share one
//! transaction, and the UNIQUE(post_id, user_id) index makes duplicate
//! likes a constraint matter rather than a read-then-write race.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::Content;

use super::{DbError, UserRepo};

/// Post record from database
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub company_id: Option<i64>,
    pub content: String,
    pub image_url: Option<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a post, optionally attributed to a company.
    pub async fn create(
        &self,
        user_id: i64,
        content: &Content,
        company_id: Option<i64>,
        image_url: Option<String>,
    ) -> Result<i64, DbError> {
        if !UserRepo::new(self.pool).exists(user_id).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id,
            });
        }

        if let Some(company_id) = company_id {
            let exists: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE id = ?)")
                    .bind(company_id)
                    .fetch_one(self.pool)
                    .await?;
            if !exists.0 {
                return Err(DbError::NotFound {
                    resource: "company",
                    id: company_id,
                });
            }
        }

        let result = sqlx::query(
            r#"
            INSERT INTO posts (user_id, company_id, content, image_url, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .bind(content.as_str())
        .bind(image_url.as_deref())
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// The global feed, newest first.
    pub async fn feed(&self) -> Result<Vec<Post>, DbError> {
        let posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT id, user_id, company_id, content, image_url,
                   likes_count, comments_count, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Get a single post by id.
    pub async fn get(&self, id: i64) -> Result<Post, DbError> {
        let post: Option<Post> = sqlx::query_as(
            r#"
            SELECT id, user_id, company_id, content, image_url,
                   likes_count, comments_count, created_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        post.ok_or(DbError::NotFound {
            resource: "post",
            id,
        })
    }

    /// Like a post on behalf of a user.
    ///
    /// A second like by the same user hits ON CONFLICT DO NOTHING and is
    /// reported as `Conflict` without touching the counter.
    pub async fn like(&self, post_id: i64, user_id: i64) -> Result<(), DbError> {
        if !UserRepo::new(self.pool).exists(user_id).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id,
            });
        }

        let mut tx = self.pool.begin().await?;

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?)")
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "post",
                id: post_id,
            });
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO likes (post_id, user_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(DbError::Conflict {
                reason: "post already liked".into(),
            });
        }

        sqlx::query("UPDATE posts SET likes_count = likes_count + 1 WHERE id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;

    async fn seed_post(pool: &SqlitePool, user_id: i64) -> i64 {
        PostRepo::new(pool)
            .create(
                user_id,
                &Content::new("We just closed our pre-seed round").unwrap(),
                None,
                None,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn post_without_company_appears_in_feed() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;
        let repo = PostRepo::new(&pool);

        let first = seed_post(&pool, author).await;
        let second = seed_post(&pool, author).await;

        let feed = repo.feed().await.unwrap();
        assert_eq!(feed.len(), 2);
        // Newest first
        assert_eq!(feed[0].id, second);
        assert_eq!(feed[1].id, first);
        assert_eq!(feed[0].company_id, None);
    }

    #[tokio::test]
    async fn like_increments_exactly_once() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;
        let repo = PostRepo::new(&pool);
        let post_id = seed_post(&pool, author).await;

        repo.like(post_id, fan).await.unwrap();
        assert_eq!(repo.get(post_id).await.unwrap().likes_count, 1);

        let err = repo.like(post_id, fan).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        // No second increment
        assert_eq!(repo.get(post_id).await.unwrap().likes_count, 1);
    }

    #[tokio::test]
    async fn two_users_two_likes() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;
        let repo = PostRepo::new(&pool);
        let post_id = seed_post(&pool, author).await;

        repo.like(post_id, author).await.unwrap();
        repo.like(post_id, fan).await.unwrap();

        assert_eq!(repo.get(post_id).await.unwrap().likes_count, 2);
    }

    #[tokio::test]
    async fn like_missing_post_is_not_found() {
        let pool = test_support::pool().await;
        let fan = test_support::seed_user(&pool, "fan@cofound.app").await;

        let err = PostRepo::new(&pool).like(404, fan).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "post", .. }));
    }

    #[tokio::test]
    async fn post_with_unknown_company_is_not_found() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;

        let err = PostRepo::new(&pool)
            .create(
                author,
                &Content::new("ghost company post").unwrap(),
                Some(9000),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "company", .. }));
    }
}
