//! Shared types for the order-engine workspace
//!
//! Domain models, turn-level request/response types and utility helpers
//! used by the engine crate and its tests.

pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Bill, BillLine, DiningTable, Food, OrderPhase, OrderState, PendingChoice, ResolvedItem,
    TableDesignator,
};
pub use request::{EntityHint, EntityKind, TurnCommand};
pub use response::{OrderPayload, TurnReply};
