// Key-based UI string table for the supported locales
use super::preferences::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiText {
    Dashboard,
    ControlPanel,
    Settings,
    Online,
    Offline,
    ControlReady,
    BackendOffline,
    Pitch,
    Yaw,
    Roll,
    Altitude,
    SoilSuitability,
    Suitable,
    NotSuitable,
    AltitudeChart,
    TimeRange,
    LastHour,
    LastSixHours,
    LastDay,
    LastWeek,
    PeakAltitude,
    AverageAltitude,
    Stability,
    StabilityGood,
    StabilityFair,
    StabilityUnstable,
    PropellerControls,
    AllPropellers,
    PropellerOn,
    PropellerOff,
    ActionLog,
    Appearance,
    Theme,
    Light,
    Dark,
    Language,
}

impl UiText {
    pub const ALL: [UiText; 36] = [
        UiText::Dashboard,
        UiText::ControlPanel,
        UiText::Settings,
        UiText::Online,
        UiText::Offline,
        UiText::ControlReady,
        UiText::BackendOffline,
        UiText::Pitch,
        UiText::Yaw,
        UiText::Roll,
        UiText::Altitude,
        UiText::SoilSuitability,
        UiText::Suitable,
        UiText::NotSuitable,
        UiText::AltitudeChart,
        UiText::TimeRange,
        UiText::LastHour,
        UiText::LastSixHours,
        UiText::LastDay,
        UiText::LastWeek,
        UiText::PeakAltitude,
        UiText::AverageAltitude,
        UiText::Stability,
        UiText::StabilityGood,
        UiText::StabilityFair,
        UiText::StabilityUnstable,
        UiText::PropellerControls,
        UiText::AllPropellers,
        UiText::PropellerOn,
        UiText::PropellerOff,
        UiText::ActionLog,
        UiText::Appearance,
        UiText::Theme,
        UiText::Light,
        UiText::Dark,
        UiText::Language,
    ];

    /// Stable identifier used by page templates.
    pub fn id(&self) -> &'static str {
        match self {
            UiText::Dashboard => "nav.dashboard",
            UiText::ControlPanel => "nav.control-panel",
            UiText::Settings => "nav.settings",
            UiText::Online => "status.online",
            UiText::Offline => "status.offline",
            UiText::ControlReady => "status.control-ready",
            UiText::BackendOffline => "status.backend-offline",
            UiText::Pitch => "attitude.pitch",
            UiText::Yaw => "attitude.yaw",
            UiText::Roll => "attitude.roll",
            UiText::Altitude => "telemetry.altitude",
            UiText::SoilSuitability => "soil.title",
            UiText::Suitable => "soil.suitable",
            UiText::NotSuitable => "soil.not-suitable",
            UiText::AltitudeChart => "chart.title",
            UiText::TimeRange => "chart.time-range",
            UiText::LastHour => "range.1h",
            UiText::LastSixHours => "range.6h",
            UiText::LastDay => "range.24h",
            UiText::LastWeek => "range.7d",
            UiText::PeakAltitude => "stats.peak",
            UiText::AverageAltitude => "stats.average",
            UiText::Stability => "stats.stability",
            UiText::StabilityGood => "stability.good",
            UiText::StabilityFair => "stability.fair",
            UiText::StabilityUnstable => "stability.unstable",
            UiText::PropellerControls => "control.title",
            UiText::AllPropellers => "control.all",
            UiText::PropellerOn => "control.on",
            UiText::PropellerOff => "control.off",
            UiText::ActionLog => "control.log",
            UiText::Appearance => "settings.appearance",
            UiText::Theme => "settings.theme",
            UiText::Light => "settings.light",
            UiText::Dark => "settings.dark",
            UiText::Language => "settings.language",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            UiText::Dashboard => "Dashboard",
            UiText::ControlPanel => "Control Panel",
            UiText::Settings => "Settings",
            UiText::Online => "Online",
            UiText::Offline => "Offline",
            UiText::ControlReady => "Control Ready",
            UiText::BackendOffline => "Backend Offline",
            UiText::Pitch => "Pitch",
            UiText::Yaw => "Yaw",
            UiText::Roll => "Roll",
            UiText::Altitude => "Altitude",
            UiText::SoilSuitability => "Soil Suitability",
            UiText::Suitable => "Suitable",
            UiText::NotSuitable => "Not Suitable",
            UiText::AltitudeChart => "Altitude Chart",
            UiText::TimeRange => "Time Range",
            UiText::LastHour => "Last 1 hour",
            UiText::LastSixHours => "Last 6 hours",
            UiText::LastDay => "Last 24 hours",
            UiText::LastWeek => "Last 7 days",
            UiText::PeakAltitude => "Peak Altitude",
            UiText::AverageAltitude => "Average Altitude",
            UiText::Stability => "Stability",
            UiText::StabilityGood => "Good",
            UiText::StabilityFair => "Fair",
            UiText::StabilityUnstable => "Unstable",
            UiText::PropellerControls => "Propeller Controls",
            UiText::AllPropellers => "All Propellers",
            UiText::PropellerOn => "ON",
            UiText::PropellerOff => "OFF",
            UiText::ActionLog => "Action Log",
            UiText::Appearance => "Appearance",
            UiText::Theme => "Theme",
            UiText::Light => "Light",
            UiText::Dark => "Dark",
            UiText::Language => "Language",
        }
    }

    fn indonesian(&self) -> &'static str {
        match self {
            UiText::Dashboard => "Dasbor",
            UiText::ControlPanel => "Panel Kontrol",
            UiText::Settings => "Pengaturan",
            UiText::Online => "Online",
            UiText::Offline => "Offline",
            UiText::ControlReady => "Kontrol Siap",
            UiText::BackendOffline => "Backend Offline",
            UiText::Pitch => "Pitch",
            UiText::Yaw => "Yaw",
            UiText::Roll => "Roll",
            UiText::Altitude => "Ketinggian",
            UiText::SoilSuitability => "Kesesuaian Tanah",
            UiText::Suitable => "Sesuai",
            UiText::NotSuitable => "Tidak Sesuai",
            UiText::AltitudeChart => "Grafik Ketinggian",
            UiText::TimeRange => "Rentang Waktu",
            UiText::LastHour => "1 jam terakhir",
            UiText::LastSixHours => "6 jam terakhir",
            UiText::LastDay => "24 jam terakhir",
            UiText::LastWeek => "7 hari terakhir",
            UiText::PeakAltitude => "Ketinggian Puncak",
            UiText::AverageAltitude => "Ketinggian Rata-rata",
            UiText::Stability => "Stabilitas",
            UiText::StabilityGood => "Baik",
            UiText::StabilityFair => "Cukup",
            UiText::StabilityUnstable => "Tidak Stabil",
            UiText::PropellerControls => "Kontrol Baling-baling",
            UiText::AllPropellers => "Semua Baling-baling",
            UiText::PropellerOn => "ON",
            UiText::PropellerOff => "OFF",
            UiText::ActionLog => "Log Aksi",
            UiText::Appearance => "Tampilan",
            UiText::Theme => "Tema",
            UiText::Light => "Terang",
            UiText::Dark => "Gelap",
            UiText::Language => "Bahasa",
        }
    }
}

pub fn translate(locale: Locale, key: UiText) -> &'static str {
    match locale {
        Locale::En => key.english(),
        Locale::Id => key.indonesian(),
    }
}

/// Every `(id, text)` pair for a locale, in declaration order.
pub fn table(locale: Locale) -> Vec<(&'static str, &'static str)> {
    UiText::ALL
        .iter()
        .map(|key| (key.id(), translate(locale, *key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_translate_per_locale() {
        assert_eq!(translate(Locale::En, UiText::PeakAltitude), "Peak Altitude");
        assert_eq!(translate(Locale::Id, UiText::PeakAltitude), "Ketinggian Puncak");
        assert_eq!(translate(Locale::Id, UiText::LastWeek), "7 hari terakhir");
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = UiText::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids.len(), UiText::ALL.len());
    }

    #[test]
    fn test_table_covers_every_key() {
        let table = table(Locale::Id);
        assert_eq!(table.len(), UiText::ALL.len());
        assert!(table.contains(&("stability.good", "Baik")));
    }
}
