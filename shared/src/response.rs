//! Turn-level response types
//!
//! Every turn yields a natural-language reply; the confirmation step
//! additionally carries a structured payload for downstream consumers.

use crate::models::ResolvedItem;
use serde::{Deserialize, Serialize};

/// Status value attached to the confirmation payload
pub const STATUS_PENDING_CONFIRMATION: &str = "pending_confirmation";

/// Structured order payload emitted alongside the confirmation question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    pub message: String,
    pub order: Vec<ResolvedItem>,
    /// Table label, e.g. "Bàn 5" or "Mang về"
    pub table: String,
    pub status: String,
}

/// The engine's answer for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<OrderPayload>,
}

impl TurnReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            payload: None,
        }
    }

    pub fn with_payload(payload: OrderPayload) -> Self {
        Self {
            text: payload.message.clone(),
            payload: Some(payload),
        }
    }
}
