//! Session Store
//!
//! Opaque per-conversation key/value slots. The store itself belongs to
//! the dialogue manager; the engine only reads and writes two named
//! slots and treats values as strings (the working order is JSON at this
//! boundary, typed everywhere else).

use async_trait::async_trait;
use dashmap::DashMap;

/// Slot holding the current table label ("Bàn 5", "Mang về")
pub const SLOT_TABLE: &str = "table_name";

/// Slot holding the serialized working order
pub const SLOT_PENDING_ORDER: &str = "pending_order";

/// Session-scoped slot storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, slot: &str) -> Option<String>;
    async fn set(&self, session_id: &str, slot: &str, value: String);
    async fn remove(&self, session_id: &str, slot: &str);
}

/// In-memory store backing tests and the demo binary
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slots: DashMap<(String, String), String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str, slot: &str) -> Option<String> {
        self.slots
            .get(&(session_id.to_string(), slot.to_string()))
            .map(|v| v.clone())
    }

    async fn set(&self, session_id: &str, slot: &str, value: String) {
        self.slots
            .insert((session_id.to_string(), slot.to_string()), value);
    }

    async fn remove(&self, session_id: &str, slot: &str) {
        self.slots
            .remove(&(session_id.to_string(), slot.to_string()));
    }
}
