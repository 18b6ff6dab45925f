use dsweather::api::run_web_server;
use dsweather::config::{run_options::get_args, Config};
use dsweather::db::Database;
use dsweather::node_server::{run_node_server, AppState};
use dsweather::nodes::host::{monitor_mqtt, MqttHost};
use dsweather::time::RealTimeProvider;
use dsweather::utils::start_log;
use dsweather::weather::client::DarkSkyClient;
use std::{error::Error, sync::Arc};
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = get_args();
    let cfg = Config::load(&args)?;
    let log_handle = start_log(&cfg.log.level);

    info!(config = %args.cfg_file.display(), "Starting application...");

    let db = Arc::new(Database::new(&cfg.database.name)?);
    let (host, eventloop) = MqttHost::new(&cfg.mqtt);
    let provider = Arc::new(DarkSkyClient::new(&cfg.weather)?);

    let mut app_state = AppState::new(provider, Arc::new(host), db, Arc::new(RealTimeProvider));
    app_state.log_handle = log_handle;
    app_state.log = cfg.log.clone();
    app_state.polling = cfg.polling;
    app_state.default_params = cfg.params.clone();
    let app_state = Arc::new(app_state);

    let (stop_tx, stop_rx) = watch::channel(false);

    let mqtt = tokio::spawn(monitor_mqtt(eventloop, stop_rx.clone()));
    let node_server = tokio::spawn(run_node_server(app_state.clone(), stop_rx.clone(), None));
    let web_server = tokio::spawn(run_web_server(app_state, cfg.web_server.address.clone(), stop_rx));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested.");
    let _ = stop_tx.send(true);

    if let Ok(Err(e)) = node_server.await {
        error!(error = %e, "Node server ended with error");
    }
    if let Ok(Err(e)) = web_server.await {
        error!(error = %e, "Web server ended with error");
    }
    let _ = mqtt.await;
    Ok(())
}
