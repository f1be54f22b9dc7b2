//! Dining Table Repository

use super::RepoResult;
use shared::models::{DiningTable, TABLE_STATUS_EMPTY};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Read-or-create a table row by label, inside the caller's transaction.
///
/// Safe under concurrent creation of the same label: the unique index on
/// `name` plus `ON CONFLICT DO NOTHING` makes the insert idempotent, and
/// the re-read returns whichever row won.
pub async fn resolve_or_create(tx: &mut Transaction<'_, Sqlite>, label: &str) -> RepoResult<i64> {
    if let Some((id,)) = sqlx::query_as::<_, (i64,)>("SELECT id FROM dining_table WHERE name = ?")
        .bind(label)
        .fetch_optional(&mut **tx)
        .await?
    {
        return Ok(id);
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, name, status) VALUES (?, ?, ?) ON CONFLICT(name) DO NOTHING",
    )
    .bind(id)
    .bind(label)
    .bind(TABLE_STATUS_EMPTY)
    .execute(&mut **tx)
    .await?;

    let (id,) = sqlx::query_as::<_, (i64,)>("SELECT id FROM dining_table WHERE name = ?")
        .bind(label)
        .fetch_one(&mut **tx)
        .await?;
    Ok(id)
}

/// Look up a table row by label
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<DiningTable>> {
    let row = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, status FROM dining_table WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
