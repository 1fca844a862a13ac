//! Comment repository
//!
//! Comment insert and the `comments_count` bump on the parent post share
//! one transaction.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::Content;

use super::{DbError, UserRepo};

/// Comment record from database
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a comment to a post. Returns the generated comment id.
    pub async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        content: &Content,
    ) -> Result<i64, DbError> {
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

        let result = sqlx::query(
            r#"
            INSERT INTO comments (post_id, user_id, content, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comments_count = comments_count + 1 WHERE id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// List comments for a post, newest first.
    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DbError> {
        let comments: Vec<Comment> = sqlx::query_as(
            r#"
            SELECT id, post_id, user_id, content, created_at
            FROM comments
            WHERE post_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::PostRepo;
    use crate::db::test_support;

    #[tokio::test]
    async fn each_comment_bumps_counter() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;
        let posts = PostRepo::new(&pool);
        let comments = CommentRepo::new(&pool);

        let post_id = posts
            .create(author, &Content::new("Launch day!").unwrap(), None, None)
            .await
            .unwrap();

        comments
            .create(post_id, author, &Content::new("First!").unwrap())
            .await
            .unwrap();
        comments
            .create(post_id, author, &Content::new("Congrats").unwrap())
            .await
            .unwrap();

        let post = posts.get(post_id).await.unwrap();
        assert_eq!(post.comments_count, 2);
        assert_eq!(comments.list_for_post(post_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_not_found() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;

        let err = CommentRepo::new(&pool)
            .create(123, author, &Content::new("hello?").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "post", .. }));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let pool = test_support::pool().await;
        let author = test_support::seed_user(&pool, "author@cofound.app").await;
        let posts = PostRepo::new(&pool);
        let comments = CommentRepo::new(&pool);

        let post_id = posts
            .create(author, &Content::new("Thread").unwrap(), None, None)
            .await
            .unwrap();
        let first = comments
            .create(post_id, author, &Content::new("one").unwrap())
            .await
            .unwrap();
        let second = comments
            .create(post_id, author, &Content::new("two").unwrap())
            .await
            .unwrap();

        let listed = comments.list_for_post(post_id).await.unwrap();
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[1].id, first);
    }
}
