// Telemetry poller - periodic fetch, normalize and buffer
use crate::application::error::FetchError;
use crate::application::lock;
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::series::{SeriesBuffer, SeriesPoint, TimeRange};
use crate::domain::telemetry::TelemetryRecord;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Poll a single latest reading and accumulate it locally.
    Latest,
    /// Poll the backend's recent history and mirror it.
    Series { limit: usize },
}

#[derive(Debug, Clone)]
pub struct TelemetryState {
    pub online: bool,
    pub latest: Option<TelemetryRecord>,
    pub buffer: SeriesBuffer,
    pub range: TimeRange,
    pub last_error: Option<String>,
    pub last_success_ms: Option<i64>,
}

impl TelemetryState {
    pub fn new(range: TimeRange) -> Self {
        Self {
            online: false,
            latest: None,
            buffer: SeriesBuffer::new(),
            range,
            last_error: None,
            last_success_ms: None,
        }
    }
}

#[derive(Clone)]
pub struct TelemetryPoller {
    source: Arc<dyn TelemetrySource>,
    state: Arc<Mutex<TelemetryState>>,
    mode: PollMode,
    interval: Duration,
}

impl TelemetryPoller {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        mode: PollMode,
        interval: Duration,
        range: TimeRange,
    ) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(TelemetryState::new(range))),
            mode,
            interval,
        }
    }

    pub fn snapshot(&self) -> TelemetryState {
        lock(&self.state).clone()
    }

    /// Switch the retention window and prune right away.
    pub fn set_range(&self, range: TimeRange) {
        self.set_range_at(range, Utc::now().timestamp_millis());
    }

    pub fn set_range_at(&self, range: TimeRange, now_ms: i64) {
        let mut state = lock(&self.state);
        state.range = range;
        let removed = state.buffer.prune(range, now_ms);
        tracing::debug!("Range set to {}, pruned {} points", range.as_str(), removed);
    }

    pub async fn tick(&self) -> Result<(), FetchError> {
        self.tick_at(Utc::now().timestamp_millis()).await
    }

    /// One poll cycle. On failure the buffer and latest record are left untouched.
    pub async fn tick_at(&self, now_ms: i64) -> Result<(), FetchError> {
        let fetched = self.fetch_records(now_ms).await;

        let mut state = lock(&self.state);
        match fetched {
            Ok(records) => {
                if !state.online {
                    tracing::info!("Telemetry backend online");
                }
                state.online = true;
                state.last_error = None;
                state.last_success_ms = Some(now_ms);

                let points = records.iter().map(|r| SeriesPoint::from_record(r, now_ms));
                match self.mode {
                    PollMode::Latest => {
                        for point in points {
                            state.buffer.append(point);
                        }
                    }
                    PollMode::Series { .. } => state.buffer.replace_with(points),
                }
                if let Some(last) = records.into_iter().last() {
                    state.latest = Some(last);
                }

                let range = state.range;
                let pruned = state.buffer.prune(range, now_ms);
                tracing::debug!(
                    "Telemetry tick: {} points buffered, {} pruned",
                    state.buffer.len(),
                    pruned
                );
                if state.buffer.is_empty() {
                    tracing::debug!("No samples inside the {} window", range.as_str());
                }
                Ok(())
            }
            Err(e) => {
                if state.online || state.last_error.is_none() {
                    tracing::warn!("Telemetry fetch failed: {}", e);
                } else {
                    tracing::debug!("Telemetry fetch still failing: {}", e);
                }
                state.online = false;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_records(&self, now_ms: i64) -> Result<Vec<TelemetryRecord>, FetchError> {
        match self.mode {
            PollMode::Latest => {
                let payload = self.source.fetch_latest().await?;
                Ok(vec![TelemetryRecord::from_payload(&payload, now_ms)?])
            }
            PollMode::Series { limit } => {
                let payload = self.source.fetch_series(limit).await?;
                let mut records = TelemetryRecord::series_from_payload(&payload, now_ms)?;
                if records.len() > limit {
                    records.drain(..records.len() - limit);
                }
                Ok(records)
            }
        }
    }

    /// Tick on the configured interval until `shutdown` flips or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            "Telemetry poller started ({:?}, every {}ms)",
            self.mode,
            self.interval.as_millis()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are recorded in the session state.
                    let _ = self.tick().await;
                }
                _ = shutdown.changed() => {
                    tracing::info!("Telemetry poller stopping");
                    break;
                }
            }
        }
    }
}
