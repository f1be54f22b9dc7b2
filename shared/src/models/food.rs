//! Food Catalog Model

use serde::{Deserialize, Serialize};

/// Catalog entry (món ăn) — immutable reference data owned by the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub price: f64,
}
