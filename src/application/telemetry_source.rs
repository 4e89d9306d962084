// Source trait for raw telemetry payloads
use crate::application::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Latest reading; any JSON shape the normalizer understands.
    async fn fetch_latest(&self) -> Result<Value, FetchError>;

    /// The most recent `limit` readings, oldest first.
    async fn fetch_series(&self, limit: usize) -> Result<Value, FetchError>;
}
