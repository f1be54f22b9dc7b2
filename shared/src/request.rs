//! Turn-level request types
//!
//! What the upstream dialogue manager hands the engine each turn: the
//! classified command plus any entity hints its NLU layer produced.

use serde::{Deserialize, Serialize};

/// Entity kinds the upstream NLU layer may tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Food,
    Quantity,
    Table,
}

/// A tagged span from the upstream NLU layer, used only as a last-resort
/// fallback when regex extraction finds nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHint {
    pub entity: EntityKind,
    pub value: String,
}

impl EntityHint {
    pub fn new(entity: EntityKind, value: impl Into<String>) -> Self {
        Self {
            entity,
            value: value.into(),
        }
    }
}

/// One turn's classified command — the engine's single dispatch entry.
///
/// ```json
/// { "type": "Order", "data": { "text": "2 phở bò và 1 coca bàn 5" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TurnCommand {
    /// New ordering utterance
    Order {
        text: String,
        #[serde(default)]
        hints: Vec<EntityHint>,
    },
    /// Reply while a disambiguation choice is pending (index or name)
    Choose { reply: String },
    /// Commit the working order
    Confirm,
    /// Abandon the working order
    Cancel,
    /// Overwrite the quantity of an item already in the order
    Change {
        food: Option<String>,
        quantity: Option<String>,
    },
    /// Re-render the pending candidate list
    ListOptions,
}
