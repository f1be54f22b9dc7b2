//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status assigned to a table row created on the fly during commit
pub const TABLE_STATUS_EMPTY: &str = "Trống";

/// Dining table entity (bàn ăn)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub status: String,
}

/// Where an order is to be served: a physical table or takeaway.
///
/// `label()` yields the persisted table name, e.g. "Bàn 5", "Bàn Vip 2"
/// or the takeaway sentinel "Mang về".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableDesignator {
    /// No physical table — order leaves the restaurant
    Takeaway,
    /// Numbered dine-in table, optionally in the VIP section
    DineIn { vip: bool, number: u32 },
}

impl TableDesignator {
    pub fn label(&self) -> String {
        match self {
            TableDesignator::Takeaway => "Mang về".to_string(),
            TableDesignator::DineIn { vip: true, number } => format!("Bàn Vip {number}"),
            TableDesignator::DineIn { vip: false, number } => format!("Bàn {number}"),
        }
    }
}

impl fmt::Display for TableDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
