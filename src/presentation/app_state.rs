// Application state for HTTP handlers
use crate::application::dispatcher::CommandDispatcher;
use crate::application::poller::TelemetryPoller;
use crate::application::preference_service::PreferenceService;

#[derive(Clone)]
pub struct AppState {
    pub poller: TelemetryPoller,
    pub dispatcher: CommandDispatcher,
    pub preferences: PreferenceService,
}
