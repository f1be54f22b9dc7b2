//! Bill Models
//!
//! Persisted order records: one header per open bill, one line per food.

use serde::{Deserialize, Serialize};

/// Bill status: freshly created, still accepting items
pub const BILL_STATUS_OPEN: i64 = 0;

/// Creator tag stamped on bills committed by the voice pipeline
pub const BILL_CREATED_BY: &str = "system_voice";

/// Bill header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Bill {
    pub id: i64,
    /// Check-in timestamp, milliseconds UTC
    pub checkin_at: i64,
    pub table_id: i64,
    pub status: i64,
    pub created_by: String,
}

/// Bill line — unique per (bill_id, food_id), count accumulates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BillLine {
    pub bill_id: i64,
    pub food_id: i64,
    pub count: i64,
}
