//! Schema setup, run idempotently at startup
//!
//! No versioned migration history: every statement is CREATE ... IF NOT
//! EXISTS, so re-running against an existing file is a no-op.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Create all tables and indexes.
pub async fn run(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT,
            phone TEXT,
            position TEXT,
            company_name TEXT,
            avatar_url TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create users table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            industry TEXT NOT NULL,
            location TEXT NOT NULL,
            logo_url TEXT,
            employee_count INTEGER NOT NULL,
            contact_email TEXT NOT NULL,
            created_by INTEGER NOT NULL REFERENCES users(id),
            created_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create companies table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            company_id INTEGER REFERENCES companies(id),
            content TEXT NOT NULL,
            image_url TEXT,
            likes_count INTEGER NOT NULL DEFAULT 0,
            comments_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create posts table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL REFERENCES posts(id),
            user_id INTEGER NOT NULL REFERENCES users(id),
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create comments table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS likes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL REFERENCES posts(id),
            user_id INTEGER NOT NULL REFERENCES users(id),
            created_at TEXT NOT NULL,
            UNIQUE(post_id, user_id)
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create likes table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS business_cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            name TEXT NOT NULL,
            position TEXT NOT NULL DEFAULT '',
            company_name TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL,
            social_media_link TEXT,
            qr_code_data TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create business_cards table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            plan_type TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active'
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create subscriptions table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite_cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            business_card_id INTEGER NOT NULL REFERENCES business_cards(id),
            created_at TEXT NOT NULL,
            UNIQUE(user_id, business_card_id)
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create favorite_cards table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite_companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            company_id INTEGER NOT NULL REFERENCES companies(id),
            created_at TEXT NOT NULL,
            UNIQUE(user_id, company_id)
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create favorite_companies table")?;

    create_indexes(pool).await?;

    info!("database migrations complete");
    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at DESC)",
        "CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id)",
        "CREATE INDEX IF NOT EXISTS idx_likes_post ON likes(post_id)",
        "CREATE INDEX IF NOT EXISTS idx_cards_user ON business_cards(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_subscriptions_user_status ON subscriptions(user_id, status)",
        "CREATE INDEX IF NOT EXISTS idx_favorite_cards_user ON favorite_cards(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_favorite_companies_user ON favorite_companies(user_id)",
    ];

    for stmt in statements {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .context("failed to create index")?;
    }

    Ok(())
}
