use crate::application::poller::PollMode;
use crate::domain::series::TimeRange;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub telemetry: TelemetrySettings,
    pub control: ControlSettings,
    pub dashboard: DashboardSettings,
    pub preferences: PreferenceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PollModeSetting {
    Latest,
    Series,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub latest_url: String,
    pub series_url: String,
    pub mode: PollModeSetting,
    pub series_limit: usize,
    pub refresh_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl TelemetrySettings {
    pub fn poll_mode(&self) -> PollMode {
        match self.mode {
            PollModeSetting::Latest => PollMode::Latest,
            PollModeSetting::Series => PollMode::Series {
                limit: self.series_limit.max(1),
            },
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    /// Shared by telemetry polls and propeller commands.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ControlSettings {
    pub set_url: String,
    #[serde(default)]
    pub status_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub default_range: TimeRange,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferenceSettings {
    pub path: String,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_config_from("config/agrovision")
}

/// Defaults, then the optional file `name`, then `AGROVISION__SECTION__KEY` variables.
pub fn load_config_from(name: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("telemetry.latest_url", "http://127.0.0.1:5000/get_attitude")?
        .set_default("telemetry.series_url", "http://127.0.0.1:5000/get_telemetry")?
        .set_default("telemetry.mode", "latest")?
        .set_default("telemetry.series_limit", 100)?
        .set_default("telemetry.refresh_interval_ms", 500)?
        .set_default("telemetry.request_timeout_ms", 2500)?
        .set_default("control.set_url", "http://127.0.0.1:5000/propellers/set")?
        .set_default("dashboard.default_range", "1h")?
        .set_default("preferences.path", "data/preferences.toml")?
        .add_source(config::File::with_name(name).required(false))
        .add_source(config::Environment::with_prefix("AGROVISION").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config_from("config/does-not-exist").unwrap();

        assert_eq!(config.telemetry.poll_mode(), PollMode::Latest);
        assert_eq!(config.telemetry.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.telemetry.refresh_interval(), Duration::from_millis(500));
        assert_eq!(config.dashboard.default_range, TimeRange::LastHour);
        assert_eq!(config.control.status_url, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agrovision.toml");
        fs::write(
            &path,
            r#"
[telemetry]
mode = "series"
series_limit = 50
latest_url = "http://drone.local/latest"

[control]
set_url = "http://drone.local/propellers/set"
status_url = "http://drone.local/propellers/status"

[dashboard]
default_range = "7d"
"#,
        )
        .unwrap();

        let config = load_config_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.telemetry.poll_mode(), PollMode::Series { limit: 50 });
        assert_eq!(config.telemetry.latest_url, "http://drone.local/latest");
        assert_eq!(config.telemetry.series_url, "http://127.0.0.1:5000/get_telemetry");
        assert_eq!(
            config.control.status_url.as_deref(),
            Some("http://drone.local/propellers/status")
        );
        assert_eq!(config.dashboard.default_range, TimeRange::LastWeek);
    }
}
