// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_client;
pub mod http_commands;
pub mod http_telemetry;
pub mod preference_file;
