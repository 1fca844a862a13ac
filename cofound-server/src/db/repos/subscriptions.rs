//! Subscription repository
//!
//! One active subscription per user: creating a new one flips the
//! previous active row to 'cancelled' in the same transaction. Nothing
//! transitions a subscription on expiry; `end_date` merely records when
//! the plan runs out.

use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::PlanType;

use super::{DbError, UserRepo};

/// Plan length. All plans run for 30 days from purchase.
const PLAN_DAYS: i64 = 30;

/// Subscription record from database
#[derive(Debug, Clone, FromRow)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub plan_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
}

/// Subscription repository
pub struct SubscriptionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SubscriptionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Purchase a plan for a user. Returns the new subscription id.
    ///
    /// Any currently active subscription is cancelled first; both writes
    /// commit together.
    pub async fn create(&self, user_id: i64, plan: PlanType) -> Result<i64, DbError> {
        if !UserRepo::new(self.pool).exists(user_id).await? {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id,
            });
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE subscriptions SET status = 'cancelled' WHERE user_id = ? AND status = 'active'",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let start = Utc::now();
        let end = start + Duration::days(PLAN_DAYS);

        let result = sqlx::query(
            r#"
            INSERT INTO subscriptions (user_id, plan_type, start_date, end_date, status)
            VALUES (?, ?, ?, ?, 'active')
            "#,
        )
        .bind(user_id)
        .bind(plan.as_str())
        .bind(start)
        .bind(end)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Get a subscription by id.
    pub async fn get(&self, id: i64) -> Result<Subscription, DbError> {
        let sub: Option<Subscription> = sqlx::query_as(
            r#"
            SELECT id, user_id, plan_type, start_date, end_date, status
            FROM subscriptions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        sub.ok_or(DbError::NotFound {
            resource: "subscription",
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn plan_runs_thirty_days() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "payer@cofound.app").await;
        let repo = SubscriptionRepo::new(&pool);

        let id = repo.create(user, PlanType::Basic).await.unwrap();
        let sub = repo.get(id).await.unwrap();

        assert_eq!(sub.status, "active");
        assert_eq!(sub.plan_type, "basic");
        assert_eq!(sub.end_date, sub.start_date + Duration::days(30));
    }

    #[tokio::test]
    async fn new_plan_cancels_previous_active() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "payer@cofound.app").await;
        let repo = SubscriptionRepo::new(&pool);

        let first = repo.create(user, PlanType::Basic).await.unwrap();
        let second = repo.create(user, PlanType::Corporate).await.unwrap();

        assert_eq!(repo.get(first).await.unwrap().status, "cancelled");

        let current = repo.get(second).await.unwrap();
        assert_eq!(current.status, "active");
        assert_eq!(current.plan_type, "corporate");
    }

    #[tokio::test]
    async fn plans_are_per_user() {
        let pool = test_support::pool().await;
        let alice = test_support::seed_user(&pool, "alice@cofound.app").await;
        let bob = test_support::seed_user(&pool, "bob@cofound.app").await;
        let repo = SubscriptionRepo::new(&pool);

        let alices = repo.create(alice, PlanType::Basic).await.unwrap();
        repo.create(bob, PlanType::Advanced).await.unwrap();

        // Bob's purchase must not cancel Alice's plan
        assert_eq!(repo.get(alices).await.unwrap().status, "active");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let pool = test_support::pool().await;
        let err = SubscriptionRepo::new(&pool)
            .create(404, PlanType::Basic)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", .. }));
    }
}
