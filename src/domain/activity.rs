// Action log shown next to the propeller controls
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    /// `HH:MM:SS` in local time
    pub time: String,
    pub message: String,
}

/// Newest entries first; the oldest is dropped once full.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    capacity: usize,
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, message: impl Into<String>) {
        self.record_at(Local::now(), message);
    }

    pub fn record_at(&mut self, at: DateTime<Local>, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(ActivityEntry {
            time: at.format("%H:%M:%S").to_string(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
