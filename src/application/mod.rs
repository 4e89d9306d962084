// Application layer - Use cases and ports to the drone backend
pub mod command_sink;
pub mod dispatcher;
pub mod error;
pub mod poller;
pub mod preference_service;
pub mod preference_store;
pub mod session;
pub mod telemetry_source;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Session state is only mutated between awaits, so a poisoned lock still
/// holds consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
