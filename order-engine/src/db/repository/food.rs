//! Food Repository
//!
//! Catalog search used to resolve extracted food phrases. Reference data
//! is owned by the menu; the engine only reads it (plus an insert used
//! for seeding).

use super::RepoResult;
use shared::models::Food;
use sqlx::SqlitePool;

/// Result of resolving one food phrase against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Nothing in the catalog contains every token
    Unmatched,
    /// Exactly one entry matched
    Single(Food),
    /// Several entries matched; the user must pick, candidates sorted by name
    Ambiguous(Vec<Food>),
}

/// Conjunctive substring search: every whitespace token of `phrase` must
/// be a case-insensitive substring of the entry name. Ordered by name
/// ascending, no relevance ranking.
///
/// Zero tokens returns empty without touching the database.
pub async fn search(pool: &SqlitePool, phrase: &str) -> RepoResult<Vec<Food>> {
    let tokens: Vec<String> = phrase
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let clauses = vec!["lower(name) LIKE ?"; tokens.len()].join(" AND ");
    let sql = format!("SELECT id, name, price FROM food WHERE {clauses} ORDER BY name ASC");

    let mut query = sqlx::query_as::<_, Food>(&sql);
    for token in &tokens {
        query = query.bind(format!("%{token}%"));
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// Resolve a phrase into a tagged match outcome
pub async fn resolve(pool: &SqlitePool, phrase: &str) -> RepoResult<MatchOutcome> {
    let mut options = search(pool, phrase).await?;
    Ok(match options.len() {
        0 => MatchOutcome::Unmatched,
        1 => MatchOutcome::Single(options.remove(0)),
        _ => MatchOutcome::Ambiguous(options),
    })
}

/// Insert a catalog entry (menu seeding, tests)
pub async fn insert(pool: &SqlitePool, name: &str, price: f64) -> RepoResult<Food> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO food (id, name, price) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(price)
        .execute(pool)
        .await?;
    Ok(Food {
        id,
        name: name.to_string(),
        price,
    })
}

/// All catalog entries, name ascending
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>("SELECT id, name, price FROM food ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
