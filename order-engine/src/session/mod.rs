//! Session slot storage

mod store;

pub use store::{InMemorySessionStore, SLOT_PENDING_ORDER, SLOT_TABLE, SessionStore};
