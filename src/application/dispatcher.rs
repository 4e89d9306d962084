// Command dispatcher - optimistic propeller toggles with rollback
use crate::application::command_sink::PropellerCommandSink;
use crate::application::error::FetchError;
use crate::application::lock;
use crate::domain::activity::ActivityLog;
use crate::domain::propeller::{
    states_from_status, PendingBulk, PendingToggle, PropellerBoard, PropellerId,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct ControlState {
    pub board: PropellerBoard,
    pub online: bool,
    pub log: ActivityLog,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Applied { prop: PropellerId, state: bool },
    /// The command failed and the propeller is back at `state`.
    Reverted { prop: PropellerId, state: bool, error: String },
    /// A command for this propeller is already in flight.
    Suppressed { prop: PropellerId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkOutcome {
    Applied { state: bool },
    Reverted { failed_at: PropellerId, error: String },
    Suppressed,
}

#[derive(Clone)]
pub struct CommandDispatcher {
    sink: Arc<dyn PropellerCommandSink>,
    state: Arc<Mutex<ControlState>>,
}

impl CommandDispatcher {
    pub fn new(sink: Arc<dyn PropellerCommandSink>) -> Self {
        let state = ControlState {
            online: true,
            ..ControlState::default()
        };
        Self {
            sink,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> ControlState {
        lock(&self.state).clone()
    }

    /// The request runs in its own task, so a caller that stops waiting
    /// still leaves the propeller idle once the backend answers.
    pub async fn toggle(&self, prop: PropellerId) -> ToggleOutcome {
        let pending = match lock(&self.state).board.begin_toggle(prop) {
            Some(pending) => pending,
            None => {
                tracing::debug!("Propeller {} busy, toggle ignored", prop);
                return ToggleOutcome::Suppressed { prop };
            }
        };

        let dispatcher = self.clone();
        let task = tokio::spawn(async move {
            let result = dispatcher.sink.set_propeller(prop, pending.next).await;
            dispatcher.resolve_toggle(pending, result)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => self.resolve_toggle(pending, Err(FetchError::Network(e.to_string()))),
        }
    }

    fn resolve_toggle(&self, pending: PendingToggle, result: Result<(), FetchError>) -> ToggleOutcome {
        let prop = pending.prop;
        let mut state = lock(&self.state);
        match result {
            Ok(()) => {
                state.board.confirm_toggle(pending);
                state.online = true;
                state
                    .log
                    .record(format!("Propeller {} turned {}.", prop, on_off(pending.next)));
                tracing::info!("Propeller {} set {}", prop, on_off(pending.next));
                ToggleOutcome::Applied { prop, state: pending.next }
            }
            Err(e) => {
                state.board.revert_toggle(pending);
                state.online = false;
                state
                    .log
                    .record(format!("Error: failed to set Propeller {}. Reverted.", prop));
                tracing::warn!("Command for propeller {} failed: {}", prop, e);
                ToggleOutcome::Reverted {
                    prop,
                    state: pending.previous,
                    error: e.to_string(),
                }
            }
        }
    }

    /// All OFF if all are ON, otherwise all ON. Commands go out one at a time;
    /// the first failure stops the batch and restores every propeller.
    pub async fn toggle_all(&self) -> BulkOutcome {
        let pending = match lock(&self.state).board.begin_bulk() {
            Some(pending) => pending,
            None => {
                tracing::debug!("Propellers busy, bulk toggle ignored");
                return BulkOutcome::Suppressed;
            }
        };

        let dispatcher = self.clone();
        let task = tokio::spawn(async move {
            for prop in PropellerId::ALL {
                if let Err(e) = dispatcher.sink.set_propeller(prop, pending.target).await {
                    return dispatcher.resolve_bulk(pending, Err((prop, e)));
                }
            }
            dispatcher.resolve_bulk(pending, Ok(()))
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let failed_at = lock(&self.state)
                    .board
                    .inflight()
                    .first()
                    .copied()
                    .unwrap_or(PropellerId::A);
                self.resolve_bulk(pending, Err((failed_at, FetchError::Network(e.to_string()))))
            }
        }
    }

    fn resolve_bulk(
        &self,
        pending: PendingBulk,
        result: Result<(), (PropellerId, FetchError)>,
    ) -> BulkOutcome {
        let mut state = lock(&self.state);
        match result {
            Ok(()) => {
                state.board.confirm_bulk(pending);
                state.online = true;
                state
                    .log
                    .record(format!("All propellers turned {}.", on_off(pending.target)));
                tracing::info!("All propellers set {}", on_off(pending.target));
                BulkOutcome::Applied { state: pending.target }
            }
            Err((prop, e)) => {
                state.board.revert_bulk(pending);
                state.online = false;
                state.log.record("Error: failed to set ALL propellers. Reverted.");
                tracing::warn!("Bulk command failed at propeller {}: {}", prop, e);
                BulkOutcome::Reverted {
                    failed_at: prop,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Pull current states from the backend, if it exposes them.
    /// Returns how many propellers were updated.
    pub async fn sync_status(&self) -> Result<usize, FetchError> {
        let result = self.sink.fetch_status().await;

        let mut state = lock(&self.state);
        match result {
            Ok(None) => Ok(0),
            Ok(Some(payload)) => {
                let synced = states_from_status(&payload);
                for (prop, on) in &synced {
                    state.board.apply_synced(*prop, *on);
                }
                state.online = true;
                state.log.record("Synced initial propeller states from backend.");
                tracing::info!("Synced {} propeller states", synced.len());
                Ok(synced.len())
            }
            Err(e) => {
                state.online = false;
                state
                    .log
                    .record("Warning: unable to sync initial states (check backend).");
                tracing::warn!("Propeller status sync failed: {}", e);
                Err(e)
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
