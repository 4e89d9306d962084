// Error taxonomy for calls to the drone backend and the preference store
use crate::domain::telemetry::ShapeError;
use thiserror::Error;

/// Any failed round-trip to the drone backend. None of these are fatal;
/// callers log them and wait for the next tick or user action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Timeout, refused connection, DNS failure...
    #[error("network failure: {0}")]
    Network(String),

    #[error("backend responded with HTTP {0}")]
    Protocol(u16),

    #[error("unexpected payload: {0}")]
    Parse(String),
}

impl From<ShapeError> for FetchError {
    fn from(err: ShapeError) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is not valid TOML: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}
