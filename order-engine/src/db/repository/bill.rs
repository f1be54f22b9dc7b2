//! Bill Repository — atomic order commit
//!
//! The persistence gateway for a confirmed order. One transaction covers
//! table resolve/create, bill header resolve/create and line upserts;
//! any failure rolls the whole sequence back.

use super::{RepoError, RepoResult, dining_table};
use shared::models::{BILL_CREATED_BY, BILL_STATUS_OPEN, BillLine, OrderState};
use sqlx::SqlitePool;
use std::time::Duration;

/// Commit failure kinds. Timeout is surfaced separately from
/// data/integrity errors so operators can tell contention from bad data.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("Commit timed out")]
    Timeout,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Outcome of a successful commit
#[derive(Debug, Clone, Copy)]
pub struct CommittedOrder {
    pub bill_id: i64,
    pub table_id: i64,
}

/// Atomically persist a confirmed order onto `table_label`.
///
/// Reuses the table's open bill when one exists; otherwise inserts a new
/// header. Line counts accumulate per (bill, food) across commits.
/// Items without a catalog id are shown to the user but never persisted.
pub async fn commit_order(
    pool: &SqlitePool,
    state: &OrderState,
    table_label: &str,
    timeout: Duration,
) -> Result<CommittedOrder, CommitError> {
    match tokio::time::timeout(timeout, commit_order_tx(pool, state, table_label)).await {
        Ok(result) => result.map_err(CommitError::from),
        Err(_) => Err(CommitError::Timeout),
    }
}

async fn commit_order_tx(
    pool: &SqlitePool,
    state: &OrderState,
    table_label: &str,
) -> RepoResult<CommittedOrder> {
    let mut tx = pool.begin().await?;

    let table_id = dining_table::resolve_or_create(&mut tx, table_label).await?;

    let bill_id = match sqlx::query_as::<_, (i64,)>(
        "SELECT id FROM bill WHERE table_id = ? AND status = ? LIMIT 1",
    )
    .bind(table_id)
    .bind(BILL_STATUS_OPEN)
    .fetch_optional(&mut *tx)
    .await?
    {
        Some((id,)) => id,
        None => {
            let id = shared::util::snowflake_id();
            sqlx::query(
                "INSERT INTO bill (id, checkin_at, table_id, status, created_by) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(shared::util::now_millis())
            .bind(table_id)
            .bind(BILL_STATUS_OPEN)
            .bind(BILL_CREATED_BY)
            .execute(&mut *tx)
            .await?;
            id
        }
    };

    for item in &state.resolved {
        let Some(food_id) = item.food_id else {
            continue;
        };
        sqlx::query(
            "INSERT INTO bill_line (bill_id, food_id, count) VALUES (?, ?, ?) \
             ON CONFLICT(bill_id, food_id) DO UPDATE SET count = count + excluded.count",
        )
        .bind(bill_id)
        .bind(food_id)
        .bind(item.quantity as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(CommittedOrder { bill_id, table_id })
}

/// Lines of one bill, for reporting and tests
pub async fn find_lines(pool: &SqlitePool, bill_id: i64) -> RepoResult<Vec<BillLine>> {
    let rows = sqlx::query_as::<_, BillLine>(
        "SELECT bill_id, food_id, count FROM bill_line WHERE bill_id = ? ORDER BY food_id",
    )
    .bind(bill_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Total number of bill headers
pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bill")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
