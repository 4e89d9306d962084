// Sink trait for propeller commands
use crate::application::error::FetchError;
use crate::domain::propeller::PropellerId;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait PropellerCommandSink: Send + Sync {
    /// Send a single `{prop, state}` command. Any 2xx counts as success.
    async fn set_propeller(&self, prop: PropellerId, state: bool) -> Result<(), FetchError>;

    /// Current states as reported by the backend, `None` when no status endpoint exists.
    async fn fetch_status(&self) -> Result<Option<Value>, FetchError>;
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Records every command; can fail the n-th call (1-based) or hold calls
    /// until released.
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub sent: Arc<Mutex<Vec<(PropellerId, bool)>>>,
        pub fail_on_call: Arc<Mutex<Option<usize>>>,
        pub status: Arc<Mutex<Option<Result<Option<Value>, FetchError>>>>,
        pub gate: Option<Arc<Notify>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        pub fn fail_on(&self, call: usize) {
            *self.fail_on_call.lock().unwrap() = Some(call);
        }

        pub fn set_status(&self, status: Result<Option<Value>, FetchError>) {
            *self.status.lock().unwrap() = Some(status);
        }

        pub fn sent(&self) -> Vec<(PropellerId, bool)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PropellerCommandSink for RecordingSink {
        async fn set_propeller(&self, prop: PropellerId, state: bool) -> Result<(), FetchError> {
            let call = {
                let mut sent = self.sent.lock().unwrap();
                sent.push((prop, state));
                sent.len()
            };
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if *self.fail_on_call.lock().unwrap() == Some(call) {
                return Err(FetchError::Protocol(500));
            }
            Ok(())
        }

        async fn fetch_status(&self) -> Result<Option<Value>, FetchError> {
            self.status.lock().unwrap().clone().unwrap_or(Ok(None))
        }
    }
}
