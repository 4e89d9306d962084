// Altitude time series held for the chart window
use super::i18n::UiText;
use super::telemetry::{TelemetryRecord, Timestamp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Retention window selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    LastHour,
    LastSixHours,
    LastDay,
    LastWeek,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::LastHour,
        TimeRange::LastSixHours,
        TimeRange::LastDay,
        TimeRange::LastWeek,
    ];

    /// Unknown values fall back to the one hour window.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "6h" => TimeRange::LastSixHours,
            "24h" => TimeRange::LastDay,
            "7d" => TimeRange::LastWeek,
            _ => TimeRange::LastHour,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LastHour => "1h",
            TimeRange::LastSixHours => "6h",
            TimeRange::LastDay => "24h",
            TimeRange::LastWeek => "7d",
        }
    }

    pub fn duration_ms(&self) -> i64 {
        const HOUR_MS: i64 = 60 * 60 * 1000;
        match self {
            TimeRange::LastHour => HOUR_MS,
            TimeRange::LastSixHours => 6 * HOUR_MS,
            TimeRange::LastDay => 24 * HOUR_MS,
            TimeRange::LastWeek => 7 * 24 * HOUR_MS,
        }
    }

    pub fn label(&self) -> UiText {
        match self {
            TimeRange::LastHour => UiText::LastHour,
            TimeRange::LastSixHours => UiText::LastSixHours,
            TimeRange::LastDay => UiText::LastDay,
            TimeRange::LastWeek => UiText::LastWeek,
        }
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TimeRange::from_param(&raw))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub t: Timestamp,
    /// Resolved epoch milliseconds used for pruning.
    #[serde(skip)]
    pub at_ms: i64,
    pub alt: f64,
}

impl SeriesPoint {
    pub fn from_record(record: &TelemetryRecord, arrival_ms: i64) -> Self {
        Self {
            t: record.timestamp.clone(),
            at_ms: record.timestamp.instant_ms(arrival_ms),
            alt: record.altitude,
        }
    }
}

/// Ordered altitude samples, deduplicated against the last accepted timestamp.
#[derive(Debug, Default, Clone)]
pub struct SeriesBuffer {
    points: Vec<SeriesPoint>,
    last_key: Option<String>,
}

impl SeriesBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the point was stored.
    pub fn append(&mut self, point: SeriesPoint) -> bool {
        if !point.alt.is_finite() {
            return false;
        }
        let key = point.t.key();
        if self.last_key.as_deref() == Some(key.as_str()) {
            return false;
        }
        self.last_key = Some(key);
        self.points.push(point);
        true
    }

    /// Drop every point older than `now_ms - range`. Returns how many were removed.
    pub fn prune(&mut self, range: TimeRange, now_ms: i64) -> usize {
        let cutoff = now_ms - range.duration_ms();
        let before = self.points.len();
        self.points.retain(|p| p.at_ms >= cutoff);
        before - self.points.len()
    }

    /// Rebuild the buffer from a full history snapshot.
    pub fn replace_with(&mut self, points: impl IntoIterator<Item = SeriesPoint>) {
        self.points.clear();
        self.last_key = None;
        for point in points {
            self.append(point);
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn altitudes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.alt).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(key: &str, at_ms: i64, alt: f64) -> SeriesPoint {
        SeriesPoint {
            t: Timestamp::Text(key.to_string()),
            at_ms,
            alt,
        }
    }

    #[test]
    fn test_append_skips_repeated_timestamp() {
        let mut buffer = SeriesBuffer::new();
        assert!(buffer.append(point("t1", 0, 1.0)));
        assert!(!buffer.append(point("t1", 0, 2.0)));
        assert_eq!(buffer.len(), 1);

        assert!(buffer.append(point("t2", 1, 2.0)));
        // Only the most recent timestamp is compared.
        assert!(buffer.append(point("t1", 2, 3.0)));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_append_rejects_unknown_altitude() {
        let mut buffer = SeriesBuffer::new();
        assert!(!buffer.append(point("t1", 0, f64::NAN)));
        assert!(!buffer.append(point("t2", 0, f64::INFINITY)));
        assert!(buffer.is_empty());
        // A rejected sample does not block the next one with the same timestamp.
        assert!(buffer.append(point("t1", 0, 4.0)));
    }

    #[test]
    fn test_text_and_numeric_timestamps_share_dedup_key() {
        let mut buffer = SeriesBuffer::new();
        assert!(buffer.append(SeriesPoint { t: Timestamp::Millis(12), at_ms: 12, alt: 1.0 }));
        assert!(!buffer.append(point("12", 12, 1.0)));
    }

    #[test]
    fn test_fractional_numeric_timestamps_both_append() {
        let fractional = |ms: f64| SeriesPoint {
            t: Timestamp::Number(serde_json::Number::from_f64(ms).unwrap()),
            at_ms: ms.round() as i64,
            alt: ms,
        };
        let mut buffer = SeriesBuffer::new();
        assert!(buffer.append(fractional(1000.5)));
        assert!(buffer.append(fractional(1000.7)));
        assert!(!buffer.append(fractional(1000.7)));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_prune_is_order_independent() {
        let hour = TimeRange::LastHour.duration_ms();
        let now = 10 * hour;
        let mut buffer = SeriesBuffer::new();
        buffer.append(point("a", now - 10, 1.0));
        buffer.append(point("b", now - hour - 1, 2.0));
        buffer.append(point("c", now - hour, 3.0));
        buffer.append(point("d", now - 2 * hour, 4.0));

        let removed = buffer.prune(TimeRange::LastHour, now);

        assert_eq!(removed, 2);
        assert_eq!(buffer.altitudes(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_wider_range_keeps_more_history() {
        let hour = TimeRange::LastHour.duration_ms();
        let now = 100 * hour;
        let mut buffer = SeriesBuffer::new();
        buffer.append(point("a", now - 5 * hour, 1.0));
        buffer.append(point("b", now - 30 * hour, 2.0));

        assert_eq!(buffer.clone().prune(TimeRange::LastSixHours, now), 1);
        assert_eq!(buffer.prune(TimeRange::LastWeek, now), 0);
    }

    #[test]
    fn test_replace_with_applies_append_rules() {
        let mut buffer = SeriesBuffer::new();
        buffer.append(point("old", 0, 9.0));
        buffer.replace_with(vec![
            point("a", 1, 1.0),
            point("a", 1, 1.0),
            point("b", 2, f64::NAN),
            point("c", 3, 3.0),
        ]);
        assert_eq!(buffer.altitudes(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_time_range_params() {
        assert_eq!(TimeRange::from_param("24h"), TimeRange::LastDay);
        assert_eq!(TimeRange::from_param("bogus"), TimeRange::LastHour);
        assert_eq!(TimeRange::LastWeek.duration_ms(), 604_800_000);
        for range in TimeRange::ALL {
            assert_eq!(TimeRange::from_param(range.as_str()), range);
        }
    }
}
