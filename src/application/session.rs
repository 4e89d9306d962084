// Session views - localized snapshots of telemetry and control state
use crate::application::dispatcher::ControlState;
use crate::application::poller::TelemetryState;
use crate::domain::activity::ActivityEntry;
use crate::domain::i18n::{translate, UiText};
use crate::domain::preferences::Locale;
use crate::domain::propeller::PropellerId;
use crate::domain::series::{SeriesPoint, TimeRange};
use crate::domain::stats::{compute_stats, AltitudeStats};
use crate::domain::telemetry::TelemetryRecord;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RangeOption {
    pub value: TimeRange,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub online: bool,
    pub status_text: &'static str,
    pub latest: Option<TelemetryRecord>,
    /// Backend soil text; the two known verdicts are shown translated.
    pub soil_label: Option<String>,
    pub soil_suitable: Option<bool>,
    pub points: Vec<SeriesPoint>,
    pub stats: AltitudeStats,
    pub stability_label: Option<&'static str>,
    pub range: TimeRange,
    pub range_label: &'static str,
    pub range_options: Vec<RangeOption>,
    pub last_error: Option<String>,
    pub last_success_ms: Option<i64>,
}

impl DashboardView {
    pub fn build(state: &TelemetryState, locale: Locale) -> Self {
        let stats = compute_stats(&state.buffer.altitudes());
        let status = if state.online { UiText::Online } else { UiText::Offline };

        let soil = state
            .latest
            .as_ref()
            .filter(|record| !record.soil_status.is_empty());
        let soil_suitable = soil.map(TelemetryRecord::is_soil_suitable);
        let soil_label = soil.map(|record| soil_label(record, locale));

        Self {
            online: state.online,
            status_text: translate(locale, status),
            latest: state.latest.clone(),
            soil_label,
            soil_suitable,
            points: state.buffer.points().to_vec(),
            stats,
            stability_label: stats.stability.map(|s| translate(locale, s.label())),
            range: state.range,
            range_label: translate(locale, state.range.label()),
            range_options: TimeRange::ALL
                .into_iter()
                .map(|value| RangeOption {
                    value,
                    label: translate(locale, value.label()),
                })
                .collect(),
            last_error: state.last_error.clone(),
            last_success_ms: state.last_success_ms,
        }
    }
}

fn soil_label(record: &TelemetryRecord, locale: Locale) -> String {
    if record.is_soil_suitable() {
        translate(locale, UiText::Suitable).to_string()
    } else if record.soil_status.eq_ignore_ascii_case("not suitable") {
        translate(locale, UiText::NotSuitable).to_string()
    } else {
        record.soil_status.clone()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PropellerView {
    pub id: PropellerId,
    pub on: bool,
    pub inflight: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlView {
    pub online: bool,
    pub status_text: &'static str,
    pub propellers: Vec<PropellerView>,
    pub log: Vec<ActivityEntry>,
}

impl ControlView {
    pub fn build(state: &ControlState, locale: Locale) -> Self {
        let status = if state.online {
            UiText::ControlReady
        } else {
            UiText::BackendOffline
        };
        let propellers = PropellerId::ALL
            .into_iter()
            .map(|id| {
                let on = state.board.is_on(id);
                PropellerView {
                    id,
                    on,
                    inflight: state.board.is_inflight(id),
                    label: translate(locale, if on { UiText::PropellerOn } else { UiText::PropellerOff }),
                }
            })
            .collect();

        Self {
            online: state.online,
            status_text: translate(locale, status),
            propellers,
            log: state.log.entries(),
        }
    }
}
