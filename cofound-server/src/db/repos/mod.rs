//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles duplicates via UNIQUE constraints + ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-step operations (child insert + counter bump)

pub mod admin;
pub mod cards;
pub mod comments;
pub mod companies;
pub mod favorites;
pub mod posts;
pub mod subscriptions;
pub mod users;

pub use admin::{AdminRepo, ResetFlags};
pub use cards::{BusinessCard, CardRepo};
pub use comments::{Comment, CommentRepo};
pub use companies::{Company, CompanyRepo};
pub use favorites::FavoriteRepo;
pub use posts::{Post, PostRepo};
pub use subscriptions::{Subscription, SubscriptionRepo};
pub use users::{User, UserRepo};

/// Database error type shared by all repositories
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    #[error("conflict: {reason}")]
    Conflict { reason: String },
}

/// Whether an sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}
