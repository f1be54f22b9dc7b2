//! Data models
//!
//! Shared between the engine crate and its consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod bill;
pub mod dining_table;
pub mod food;
pub mod order_state;

// Re-exports
pub use bill::*;
pub use dining_table::*;
pub use food::*;
pub use order_state::*;
