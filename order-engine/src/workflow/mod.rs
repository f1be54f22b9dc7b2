//! Confirmation Workflow — multi-turn order state machine
//!
//! Drives one conversation from free-form utterance to committed bill:
//!
//! ```text
//! COLLECTING ──utterance──► extraction + catalog resolution
//!     ├─ any ambiguous item ──► AWAITING_DISAMBIGUATION ──choice──┐
//!     │                              │ (more pending: stay)       │
//!     └─ all items settled ──────────┴──► AWAITING_CONFIRMATION ◄─┘
//!                                              ├─ confirm ► COMMITTED  (state cleared)
//!                                              └─ cancel  ► CANCELLED  (state cleared)
//! ```
//!
//! The dialogue manager serializes turns per session, so the workflow
//! holds no locks of its own; the only suspension points are catalog
//! reads and the commit transaction.

pub mod reply;

#[cfg(test)]
mod tests;

use crate::core::Config;
use crate::db::repository::{CommitError, MatchOutcome, bill, food};
use crate::nlu::{ItemExtractor, RegexExtractor, resolve_table};
use crate::session::{SLOT_PENDING_ORDER, SLOT_TABLE, SessionStore};
use crate::utils::{EngineError, EngineResult};
use shared::models::{Food, OrderState, PendingChoice, ResolvedItem, TableDesignator};
use shared::request::{EntityHint, TurnCommand};
use shared::response::{OrderPayload, STATUS_PENDING_CONFIRMATION, TurnReply};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// What the session store currently holds for a conversation
enum Loaded {
    Absent,
    Valid(OrderState),
    Corrupt,
}

/// The confirmation workflow. One instance serves all sessions.
pub struct OrderWorkflow {
    pool: SqlitePool,
    sessions: Arc<dyn SessionStore>,
    extractor: Arc<dyn ItemExtractor>,
    commit_timeout: Duration,
}

impl OrderWorkflow {
    pub fn new(pool: SqlitePool, sessions: Arc<dyn SessionStore>, config: &Config) -> Self {
        Self {
            pool,
            sessions,
            extractor: Arc::new(RegexExtractor),
            commit_timeout: config.commit_timeout(),
        }
    }

    /// Swap the extraction layer (e.g. for a stronger parser)
    pub fn with_extractor(mut self, extractor: Arc<dyn ItemExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Dispatch one classified turn
    pub async fn execute(&self, session_id: &str, command: TurnCommand) -> EngineResult<TurnReply> {
        match command {
            TurnCommand::Order { text, hints } => {
                self.process_order(session_id, &text, &hints).await
            }
            TurnCommand::Choose { reply } => self.resolve_choice(session_id, &reply).await,
            TurnCommand::Confirm => self.confirm(session_id).await,
            TurnCommand::Cancel => self.cancel(session_id).await,
            TurnCommand::Change { food, quantity } => {
                self.change_item(session_id, food.as_deref(), quantity.as_deref())
                    .await
            }
            TurnCommand::ListOptions => self.list_options(session_id).await,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// New utterance: extract mentions, resolve each against the catalog,
    /// then branch to disambiguation or confirmation.
    async fn process_order(
        &self,
        session_id: &str,
        text: &str,
        hints: &[EntityHint],
    ) -> EngineResult<TurnReply> {
        // A table mentioned this turn wins; otherwise keep the previous one
        let prev_table = match self.load_state(session_id).await {
            Loaded::Valid(s) => s.table,
            _ => None,
        };
        let table = resolve_table(text).or(prev_table);

        let extracted = self.extractor.extract(text, hints);
        tracing::debug!(
            session = session_id,
            mentions = extracted.len(),
            "Extracted order mentions"
        );

        let mut state = OrderState {
            table,
            ..Default::default()
        };
        for item in extracted {
            match food::resolve(&self.pool, &item.food_raw).await? {
                MatchOutcome::Single(entry) => {
                    state.resolved.push(ResolvedItem::matched(&entry, item.quantity));
                }
                MatchOutcome::Unmatched => {
                    state
                        .resolved
                        .push(ResolvedItem::unmatched(item.food_raw, item.quantity));
                }
                MatchOutcome::Ambiguous(options) => {
                    state.pending.push(PendingChoice {
                        raw: item.food_raw,
                        quantity: item.quantity,
                        options,
                    });
                }
            }
        }

        if let Some(designator) = &state.table {
            self.sessions
                .set(session_id, SLOT_TABLE, designator.label())
                .await;
        }

        if let Some(choice) = state.first_pending() {
            let prompt = reply::choices_prompt(choice);
            tracing::info!(
                session = session_id,
                phrase = %choice.raw,
                candidates = choice.options.len(),
                "Awaiting disambiguation"
            );
            self.save_state(session_id, &state).await?;
            return Ok(TurnReply::text(prompt));
        }

        self.confirmation_reply(session_id, state).await
    }

    /// Reply while a choice is pending: index into the shown list, or a
    /// candidate name (exact first, then substring), case-insensitive.
    /// Anything else re-presents the list unchanged.
    async fn resolve_choice(&self, session_id: &str, choice_reply: &str) -> EngineResult<TurnReply> {
        let mut state = match self.load_state(session_id).await {
            Loaded::Absent => return Ok(TurnReply::text(reply::MSG_NOTHING_TO_CHOOSE)),
            Loaded::Corrupt => return Ok(TurnReply::text(reply::MSG_INVALID_STATE)),
            Loaded::Valid(s) => s,
        };
        if state.pending.is_empty() {
            return Ok(TurnReply::text(reply::MSG_NO_PENDING_CHOICE));
        }

        let Some(entry) = pick_candidate(&state.pending[0].options, choice_reply) else {
            return Ok(TurnReply::text(reply::choices_prompt(&state.pending[0])));
        };

        let choice = state.pending.remove(0);
        state
            .resolved
            .push(ResolvedItem::matched(&entry, choice.quantity));
        tracing::info!(session = session_id, food = %entry.name, "Disambiguation resolved");

        if let Some(next) = state.first_pending() {
            let prompt = reply::choices_prompt(next);
            self.save_state(session_id, &state).await?;
            return Ok(TurnReply::text(prompt));
        }

        self.confirmation_reply(session_id, state).await
    }

    /// Commit the working order through the persistence gateway.
    /// On failure the state is kept so the user can retry.
    async fn confirm(&self, session_id: &str) -> EngineResult<TurnReply> {
        let state = match self.load_state(session_id).await {
            Loaded::Absent => return Ok(TurnReply::text(reply::MSG_NOTHING_TO_CONFIRM)),
            Loaded::Corrupt => return Ok(TurnReply::text(reply::MSG_INVALID_STATE)),
            Loaded::Valid(s) => s,
        };

        if let Some(choice) = state.first_pending() {
            // Still disambiguating; confirming now would commit a partial order
            return Ok(TurnReply::text(format!(
                "{}\n{}",
                reply::MSG_CHOOSE_BEFORE_CONFIRM,
                reply::choices_prompt(choice)
            )));
        }
        if state.resolved.is_empty() {
            self.clear_session(session_id).await;
            return Ok(TurnReply::text(reply::MSG_EMPTY_ORDER));
        }

        let label = state
            .table
            .clone()
            .unwrap_or(TableDesignator::Takeaway)
            .label();

        match bill::commit_order(&self.pool, &state, &label, self.commit_timeout).await {
            Ok(committed) => {
                tracing::info!(
                    session = session_id,
                    bill_id = committed.bill_id,
                    table = %label,
                    "Order committed"
                );
                self.clear_session(session_id).await;
                Ok(TurnReply::text(reply::commit_success(
                    committed.bill_id,
                    &state.resolved,
                    &label,
                )))
            }
            Err(err) => {
                match &err {
                    CommitError::Timeout => {
                        tracing::error!(session = session_id, "Order commit timed out")
                    }
                    CommitError::Repo(e) => {
                        tracing::error!(session = session_id, error = %e, "Order commit failed")
                    }
                }
                Ok(TurnReply::text(reply::MSG_COMMIT_FAILED))
            }
        }
    }

    /// Abandon the working order from any non-terminal state
    async fn cancel(&self, session_id: &str) -> EngineResult<TurnReply> {
        self.clear_session(session_id).await;
        tracing::info!(session = session_id, "Order cancelled");
        Ok(TurnReply::text(reply::MSG_CANCELLED))
    }

    /// Overwrite the quantity of an item already in the order
    async fn change_item(
        &self,
        session_id: &str,
        food: Option<&str>,
        quantity: Option<&str>,
    ) -> EngineResult<TurnReply> {
        let mut state = match self.load_state(session_id).await {
            Loaded::Absent => return Ok(TurnReply::text(reply::MSG_NOTHING_TO_EDIT)),
            Loaded::Corrupt => return Ok(TurnReply::text(reply::MSG_INVALID_STATE)),
            Loaded::Valid(s) => s,
        };
        if state.resolved.is_empty() {
            return Ok(TurnReply::text(reply::MSG_EMPTY_EDIT));
        }
        let Some(food) = food else {
            return Ok(TurnReply::text(reply::MSG_WHICH_FOOD));
        };

        let needle = food.to_lowercase();
        let Some(item) = state
            .resolved
            .iter_mut()
            .find(|i| i.food.to_lowercase().contains(&needle))
        else {
            return Ok(TurnReply::text(reply::not_in_order(food)));
        };

        if let Some(q) = quantity {
            item.quantity = q.trim().parse().ok().filter(|&q| q >= 1).unwrap_or(1);
        }

        let summary = reply::summary(&state.resolved);
        self.save_state(session_id, &state).await?;
        Ok(TurnReply::text(reply::updated(&summary)))
    }

    /// Re-render the pending candidate list. Side-effect-free.
    async fn list_options(&self, session_id: &str) -> EngineResult<TurnReply> {
        match self.load_state(session_id).await {
            Loaded::Absent => Ok(TurnReply::text(reply::MSG_NOTHING_TO_CHOOSE)),
            Loaded::Corrupt => Ok(TurnReply::text(reply::MSG_INVALID_STATE)),
            Loaded::Valid(state) => match state.first_pending() {
                Some(choice) => Ok(TurnReply::text(reply::choices_list(choice))),
                None => Ok(TurnReply::text(reply::MSG_NO_PENDING_CHOICE)),
            },
        }
    }

    // =========================================================================
    // Shared tails and session plumbing
    // =========================================================================

    /// All items settled: default the table if none was ever set, persist
    /// everything, and ask the confirmation question with payload.
    async fn confirmation_reply(
        &self,
        session_id: &str,
        mut state: OrderState,
    ) -> EngineResult<TurnReply> {
        let table = state.table.take().unwrap_or(TableDesignator::Takeaway);
        let label = table.label();
        state.table = Some(table);

        self.sessions
            .set(session_id, SLOT_TABLE, label.clone())
            .await;
        self.save_state(session_id, &state).await?;
        tracing::info!(
            session = session_id,
            items = state.resolved.len(),
            table = %label,
            "Awaiting confirmation"
        );

        let message = reply::confirm_question(&reply::summary(&state.resolved), &label);
        Ok(TurnReply::with_payload(OrderPayload {
            message,
            order: state.resolved,
            table: label,
            status: STATUS_PENDING_CONFIRMATION.to_string(),
        }))
    }

    async fn load_state(&self, session_id: &str) -> Loaded {
        match self.sessions.get(session_id, SLOT_PENDING_ORDER).await {
            None => Loaded::Absent,
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(state) => Loaded::Valid(state),
                Err(e) => {
                    tracing::warn!(session = session_id, error = %e, "Stored order state is corrupt");
                    Loaded::Corrupt
                }
            },
        }
    }

    async fn save_state(&self, session_id: &str, state: &OrderState) -> EngineResult<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| EngineError::internal(format!("Failed to serialize order state: {e}")))?;
        self.sessions.set(session_id, SLOT_PENDING_ORDER, json).await;
        Ok(())
    }

    async fn clear_session(&self, session_id: &str) {
        self.sessions.remove(session_id, SLOT_PENDING_ORDER).await;
        self.sessions.remove(session_id, SLOT_TABLE).await;
    }
}

/// Map a disambiguation reply onto the shown candidate list:
/// 1-based index (bounds-checked), exact name, then name substring.
fn pick_candidate(options: &[Food], choice_reply: &str) -> Option<Food> {
    let r = choice_reply.trim();
    if r.is_empty() {
        return None;
    }
    if let Ok(idx) = r.parse::<usize>() {
        return if (1..=options.len()).contains(&idx) {
            Some(options[idx - 1].clone())
        } else {
            None
        };
    }
    let needle = r.to_lowercase();
    options
        .iter()
        .find(|f| f.name.to_lowercase() == needle)
        .or_else(|| options.iter().find(|f| f.name.to_lowercase().contains(&needle)))
        .cloned()
}
