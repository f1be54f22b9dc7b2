//! Order Engine - Vietnamese restaurant voice-ordering core
//!
//! Turns free-form ordering utterances into structured, persisted bills:
//!
//! - **NLU** (`nlu`): quantity/food extraction, phrase cleanup, table detection
//! - **Workflow** (`workflow`): multi-turn disambiguation and confirmation state machine
//! - **Database** (`db`): SQLite catalog search and transactional bill commit
//! - **Sessions** (`session`): opaque per-conversation slot storage
//!
//! # Module structure
//!
//! ```text
//! order-engine/src/
//! ├── core/          # configuration
//! ├── nlu/           # normalizer, table resolver, item extractor
//! ├── db/            # pool setup, migrations, repositories
//! ├── session/       # session slot store
//! ├── workflow/      # confirmation state machine + reply texts
//! └── utils/         # errors, logging
//! ```
//!
//! The upstream dialogue manager classifies each turn into a
//! [`shared::TurnCommand`] and hands it to [`OrderWorkflow::execute`];
//! the engine answers with a [`shared::TurnReply`].

pub mod core;
pub mod db;
pub mod nlu;
pub mod session;
pub mod utils;
pub mod workflow;

// Re-export public types
pub use self::core::Config;
pub use db::DbService;
pub use session::{InMemorySessionStore, SessionStore};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{EngineError, EngineResult};
pub use workflow::OrderWorkflow;
