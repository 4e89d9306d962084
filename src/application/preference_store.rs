// Persistence seam for theme/language preferences
use crate::application::error::PreferenceError;
use std::collections::BTreeMap;

/// Flat string key-value storage, like a browser's local storage.
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError>;

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError>;
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct MemoryStore {
        pub values: Arc<Mutex<BTreeMap<String, String>>>,
        pub fail_saves: bool,
        pub fail_loads: Arc<AtomicBool>,
    }

    impl PreferenceStore for MemoryStore {
        fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(PreferenceError::Io(std::io::Error::other("unreadable")));
            }
            Ok(self.values.lock().unwrap().clone())
        }

        fn save(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
            if self.fail_saves {
                return Err(PreferenceError::Io(std::io::Error::other("read-only")));
            }
            *self.values.lock().unwrap() = values.clone();
            Ok(())
        }
    }
}
