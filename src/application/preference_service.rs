// Preference service - theme and language backed by a key-value store
use crate::application::error::PreferenceError;
use crate::application::lock;
use crate::application::preference_store::PreferenceStore;
use crate::domain::preferences::{Locale, Preferences, Theme, LANGUAGE_KEY, THEME_KEY};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
    current: Arc<Mutex<Preferences>>,
    writer: Arc<Mutex<()>>,
}

impl PreferenceService {
    /// Load stored preferences; an unreadable store falls back to defaults.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let current = match store.load() {
            Ok(values) => Preferences {
                theme: values.get(THEME_KEY).map(|v| Theme::from_stored(v)).unwrap_or_default(),
                language: values
                    .get(LANGUAGE_KEY)
                    .map(|v| Locale::from_stored(v))
                    .unwrap_or_default(),
            },
            Err(e) => {
                tracing::warn!("Could not load preferences, using defaults: {}", e);
                Preferences::default()
            }
        };
        Self {
            store,
            current: Arc::new(Mutex::new(current)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn current(&self) -> Preferences {
        *lock(&self.current)
    }

    pub fn locale(&self) -> Locale {
        self.current().language
    }

    /// Persist then apply. Other keys already in the store are preserved, so
    /// nothing is written when the store cannot be read back first.
    ///
    /// Blocks on store I/O; async callers go through `spawn_blocking`.
    pub fn update(&self, theme: Option<Theme>, language: Option<Locale>) -> Result<Preferences, PreferenceError> {
        self.apply(|previous| Preferences {
            theme: theme.unwrap_or(previous.theme),
            language: language.unwrap_or(previous.language),
        })
    }

    pub fn toggle_theme(&self) -> Result<Preferences, PreferenceError> {
        self.apply(|previous| Preferences {
            theme: previous.theme.toggled(),
            ..previous
        })
    }

    fn apply(&self, change: impl FnOnce(Preferences) -> Preferences) -> Result<Preferences, PreferenceError> {
        let _writer = lock(&self.writer);
        let next = change(self.current());

        let mut values = self.store.load().inspect_err(|e| {
            tracing::warn!("Could not read preferences, not saving: {}", e);
        })?;
        values.insert(THEME_KEY.to_string(), next.theme.as_str().to_string());
        values.insert(LANGUAGE_KEY.to_string(), next.language.as_str().to_string());
        self.store.save(&values)?;

        *lock(&self.current) = next;
        tracing::info!(
            "Preferences saved: theme={}, language={}",
            next.theme.as_str(),
            next.language.as_str()
        );
        Ok(next)
    }
}
