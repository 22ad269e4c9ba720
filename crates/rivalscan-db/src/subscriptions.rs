//! Database operations for the `subscriptions` table.
//!
//! One row per `(user_email, tracked_product)` pair. `last_run_at` records the
//! most recent successful report run and drives the cadence check.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubscriptionRow {
    pub id: i64,
    pub public_id: String,
    pub user_email: String,
    pub tracked_product: String,
    pub created_at: DateTime<Utc>,
    pub last_run_at: Option<DateTime<Utc>>,
}

const SELECT_COLUMNS: &str =
    "id, public_id, user_email, tracked_product, created_at, last_run_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a subscription if absent; a no-op when the pair already exists.
/// Returns the stored row either way.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails.
pub async fn subscribe(
    pool: &SqlitePool,
    user_email: &str,
    tracked_product: &str,
) -> Result<SubscriptionRow, DbError> {
    sqlx::query(
        "INSERT INTO subscriptions (public_id, user_email, tracked_product, created_at) \
         VALUES (?, ?, ?, ?) \
         ON CONFLICT (user_email, tracked_product) DO NOTHING",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_email)
    .bind(tracked_product)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM subscriptions \
         WHERE user_email = ? AND tracked_product = ?"
    ))
    .bind(user_email)
    .bind(tracked_product)
    .fetch_optional(pool)
    .await?;

    row.ok_or(DbError::NotFound)
}

/// Deletes a subscription; a no-op when the pair does not exist.
/// Returns whether a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn unsubscribe(
    pool: &SqlitePool,
    user_email: &str,
    tracked_product: &str,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "DELETE FROM subscriptions WHERE user_email = ? AND tracked_product = ?",
    )
    .bind(user_email)
    .bind(tracked_product)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns subscriptions due for a new run: never run, or last run at least
/// `cadence_days` before `now`. Ordered by creation time.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_due(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    cadence_days: u32,
) -> Result<Vec<SubscriptionRow>, DbError> {
    let cutoff = now - Duration::days(i64::from(cadence_days));

    let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM subscriptions \
         WHERE last_run_at IS NULL OR last_run_at <= ? \
         ORDER BY created_at, id"
    ))
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Records a completed run for a subscription.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn mark_run(
    pool: &SqlitePool,
    subscription_id: i64,
    now: DateTime<Utc>,
) -> Result<(), DbError> {
    sqlx::query("UPDATE subscriptions SET last_run_at = ? WHERE id = ?")
        .bind(now)
        .bind(subscription_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns all subscriptions, ordered by creation time.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_subscriptions(pool: &SqlitePool) -> Result<Vec<SubscriptionRow>, DbError> {
    let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM subscriptions ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
