//! Working Order State
//!
//! One `OrderState` per conversation session. Strongly typed in the
//! pipeline; serialized to JSON only at the session-store boundary.

use super::{Food, TableDesignator};
use serde::{Deserialize, Serialize};

/// One order line as the user will see it.
///
/// `food_id` is `None` when the phrase matched nothing in the catalog —
/// the item is still shown to the user but never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub food: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ResolvedItem {
    /// Item that matched exactly one catalog entry
    pub fn matched(entry: &Food, quantity: u32) -> Self {
        Self {
            food: entry.name.clone(),
            quantity,
            food_id: Some(entry.id),
            price: Some(entry.price),
        }
    }

    /// Item that matched nothing — keeps the raw phrase as display name
    pub fn unmatched(phrase: impl Into<String>, quantity: u32) -> Self {
        Self {
            food: phrase.into(),
            quantity,
            food_id: None,
            price: None,
        }
    }
}

/// A phrase that matched several catalog entries and awaits the user's pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingChoice {
    pub raw: String,
    pub quantity: u32,
    /// Candidates, ordered by name ascending as presented to the user
    pub options: Vec<Food>,
}

/// Which turn the confirmation workflow expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPhase {
    AwaitingDisambiguation,
    AwaitingConfirmation,
}

/// Per-session working order.
///
/// Created on first extraction, mutated by later turns, cleared on
/// commit or cancel. Only the first pending choice is ever surfaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(default)]
    pub resolved: Vec<ResolvedItem>,
    #[serde(default)]
    pub pending: Vec<PendingChoice>,
    #[serde(default)]
    pub table: Option<TableDesignator>,
}

impl OrderState {
    pub fn phase(&self) -> OrderPhase {
        if self.pending.is_empty() {
            OrderPhase::AwaitingConfirmation
        } else {
            OrderPhase::AwaitingDisambiguation
        }
    }

    pub fn first_pending(&self) -> Option<&PendingChoice> {
        self.pending.first()
    }

    /// True when neither resolved nor pending items exist
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.pending.is_empty()
    }
}
