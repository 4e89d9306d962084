// Domain layer - Pure telemetry, control and preference models
pub mod activity;
pub mod i18n;
pub mod preferences;
pub mod propeller;
pub mod series;
pub mod stats;
pub mod telemetry;
