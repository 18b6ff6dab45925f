use crate::{
    config::{Log, Polling},
    db::{DatabaseTrait, CUSTOM_PARAMS_KEY, LOG_LEVEL_KEY},
    error::AppError,
    nodes::{controller::Controller, host::NodeHost},
    time::TimeProvider,
    utils::{set_log_level, LogHandle},
    weather::client::WeatherProvider,
};
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn, Level};

pub struct AppState {
    pub controller: Mutex<Controller>,
    pub provider: Arc<dyn WeatherProvider>,
    pub host: Arc<dyn NodeHost>,
    pub db: Arc<dyn DatabaseTrait>,
    pub time_provider: Arc<dyn TimeProvider>,
    pub log_handle: Option<LogHandle>,
    pub log: Log,
    pub polling: Polling,
    /// Parameters used until the user saves their own.
    pub default_params: BTreeMap<String, String>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn WeatherProvider>, host: Arc<dyn NodeHost>, db: Arc<dyn DatabaseTrait>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            controller: Mutex::new(Controller::new()),
            provider,
            host,
            db,
            time_provider,
            log_handle: None,
            log: Log::default(),
            polling: Polling::default(),
            default_params: BTreeMap::new(),
        }
    }
}

/// Saved parameters win over the ones from the configuration file.
pub fn initial_params(app_state: &AppState) -> Result<BTreeMap<String, String>, AppError> {
    match app_state.db.get_param(CUSTOM_PARAMS_KEY)? {
        Some(saved) => Ok(serde_json::from_str(&saved)?),
        None => Ok(app_state.default_params.clone()),
    }
}

/// Validates, applies and persists a log level.
pub fn set_logging_level(app_state: &AppState, level: &str) -> Result<(), AppError> {
    let level = level.trim().to_ascii_lowercase();
    level.parse::<Level>().map_err(|e| AppError::Logging(e.to_string()))?;
    if let Some(handle) = &app_state.log_handle {
        set_log_level(handle, &level)?;
    }
    app_state.db.set_param(LOG_LEVEL_KEY, &level)?;
    info!(level = %level, "Log level set");
    Ok(())
}

fn restore_logging_level(app_state: &AppState) {
    let level = match app_state.db.get_param(LOG_LEVEL_KEY) {
        Ok(saved) => saved.unwrap_or_else(|| app_state.log.level.clone()),
        Err(e) => {
            error!(error = %e, "Get saved log level failed");
            app_state.log.level.clone()
        }
    };
    if let Err(e) = set_logging_level(app_state, &level) {
        warn!(level = %level, error = %e, "Saved log level ignored");
    }
}

/// One poll: fetch outside the controller lock, then publish.
pub async fn query_conditions(app_state: &AppState, force: bool) -> Result<usize, AppError> {
    let Some(params) = app_state.controller.lock().await.request_params() else {
        return Ok(0);
    };
    let response = match app_state.provider.fetch(&params).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "HTTP request failed for DarkSky");
            return Err(e);
        }
    };
    let now = app_state.time_provider.now();
    let mut controller = app_state.controller.lock().await;
    controller.process_response(&response, &params, app_state.host.as_ref(), app_state.db.as_ref(), now, force)
}

pub async fn start_node_server(app_state: &AppState) -> Result<(), AppError> {
    restore_logging_level(app_state);
    let params = initial_params(app_state)?;
    app_state.controller.lock().await.start(&params, app_state.host.as_ref(), app_state.db.as_ref())
}

/// Starts the controller, then polls every `short_poll_secs` until `stop_signal`
/// flips. The first poll forces every driver out.
pub async fn run_node_server(
    app_state: Arc<AppState>, mut stop_signal: watch::Receiver<bool>, max_polls: Option<usize>,
) -> Result<(), AppError> {
    start_node_server(&app_state).await?;

    let interval = Duration::from_secs(app_state.polling.short_poll_secs);
    let mut polls = 0;
    while max_polls.map_or(true, |max| polls < max) && !*stop_signal.borrow() {
        match query_conditions(&app_state, polls == 0).await {
            Ok(published) => debug!(published, "Poll done"),
            Err(e) => warn!(error = %e, "Poll skipped"),
        }
        polls += 1;

        tokio::select! {
            _ = app_state.time_provider.sleep(interval) => {}
            res = stop_signal.changed() => if res.is_err() { break; },
        }
    }

    app_state.controller.lock().await.stop(app_state.host.as_ref())?;
    info!("Ending node server.");
    Ok(())
}
