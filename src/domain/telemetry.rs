// Telemetry domain model - normalization of heterogeneous backend payloads
use chrono::{DateTime, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Payload shapes that cannot be turned into a record at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("telemetry array is empty")]
    EmptyArray,
    #[error("expected a telemetry object, got {0}")]
    NotAnObject(&'static str),
}

/// Timestamp exactly as reported by the backend.
///
/// Deduplication compares the canonical string form, so `"12"` and `12`
/// are treated as the same sample. Reported numbers keep their exact text;
/// `1.5` and `1.7` are different samples even though both round to 2 ms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Number(Number),
    /// Capture time, used when the payload carries no timestamp.
    Millis(i64),
}

impl Timestamp {
    pub fn key(&self) -> String {
        match self {
            Timestamp::Text(text) => text.clone(),
            Timestamp::Number(n) => n.to_string(),
            Timestamp::Millis(ms) => ms.to_string(),
        }
    }

    /// Epoch milliseconds of this timestamp, or `fallback_ms` when the text
    /// is not a recognisable date.
    pub fn instant_ms(&self, fallback_ms: i64) -> i64 {
        match self {
            Timestamp::Millis(ms) => *ms,
            Timestamp::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms.round() as i64))
                .unwrap_or(fallback_ms),
            Timestamp::Text(text) => parse_text_instant(text).unwrap_or(fallback_ms),
        }
    }
}

fn parse_text_instant(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    // The ingest API writes `isoformat() + "Z"`; anything without an offset is UTC.
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

#[derive(Debug, Clone, Serialize)]
pub struct TelemetryRecord {
    #[serde(serialize_with = "known_or_null")]
    pub pitch: f64,
    #[serde(serialize_with = "known_or_null")]
    pub yaw: f64,
    #[serde(serialize_with = "known_or_null")]
    pub roll: f64,
    #[serde(serialize_with = "known_or_null")]
    pub altitude: f64,
    pub soil_status: String,
    pub timestamp: Timestamp,
}

impl TelemetryRecord {
    /// Normalize a single payload. Arrays yield their last element.
    pub fn from_payload(payload: &Value, captured_at_ms: i64) -> Result<Self, ShapeError> {
        match payload {
            Value::Array(items) => {
                let last = items.last().ok_or(ShapeError::EmptyArray)?;
                Self::from_object(last, captured_at_ms)
            }
            other => Self::from_object(other, captured_at_ms),
        }
    }

    /// Normalize every element of a series payload, oldest first.
    /// A bare object is treated as a one-element series.
    pub fn series_from_payload(payload: &Value, captured_at_ms: i64) -> Result<Vec<Self>, ShapeError> {
        match payload {
            Value::Array(items) => items
                .iter()
                .map(|item| Self::from_object(item, captured_at_ms))
                .collect(),
            other => Ok(vec![Self::from_object(other, captured_at_ms)?]),
        }
    }

    fn from_object(value: &Value, captured_at_ms: i64) -> Result<Self, ShapeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ShapeError::NotAnObject(json_kind(value)))?;

        Ok(Self {
            pitch: coerce_number(lookup(obj, "pitch", &[("attitude", "pitch")])),
            yaw: coerce_number(lookup(obj, "yaw", &[("attitude", "yaw")])),
            roll: coerce_number(lookup(obj, "roll", &[("attitude", "roll")])),
            altitude: coerce_number(lookup(
                obj,
                "altitude",
                &[("position", "alt"), ("position", "altitude")],
            )),
            soil_status: soil_status(obj),
            timestamp: timestamp(obj.get("timestamp"), captured_at_ms),
        })
    }

    pub fn is_soil_suitable(&self) -> bool {
        let status = self.soil_status.trim();
        status.eq_ignore_ascii_case("suitable") || status.eq_ignore_ascii_case("good")
    }
}

/// Flat field first, then each nested `(parent, child)` path in order.
fn lookup<'a>(obj: &'a Map<String, Value>, flat: &str, nested: &[(&str, &str)]) -> Option<&'a Value> {
    if let Some(value) = obj.get(flat).filter(|v| !v.is_null()) {
        return Some(value);
    }
    nested
        .iter()
        .filter_map(|(parent, child)| obj.get(*parent)?.get(*child))
        .find(|v| !v.is_null())
}

/// Loose numeric coercion; anything that is not a number is unknown (NaN).
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                f64::NAN
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

fn soil_status(obj: &Map<String, Value>) -> String {
    let raw = obj.get("soil_status").or_else(|| obj.get("soilStatus"));
    match raw {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn timestamp(value: Option<&Value>, captured_at_ms: i64) -> Timestamp {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Timestamp::Text(s.clone()),
        Some(Value::Number(n)) => Timestamp::Number(n.clone()),
        _ => Timestamp::Millis(captured_at_ms),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn known_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}
