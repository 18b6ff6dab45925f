use dsweather::{
    config::params::{API_KEY, FORECAST_DAYS, LOCATION, UNITS},
    db::{DatabaseTrait, CUSTOM_PARAMS_KEY, LOG_LEVEL_KEY},
    error::AppError,
    node_server::{query_conditions, run_node_server, set_logging_level, start_node_server},
    nodes::{controller::ADDRESS, drv},
    test::utils::{
        fixtures::FORECAST_US,
        mock_provider::{failing_provider, provider_with, MockProvider},
        set_app_state,
    },
};
use std::{collections::BTreeMap, sync::Arc};

const START: i64 = 1561118400;

const CONFIGURED: [(&str, &str); 3] = [(API_KEY, "abc"), (LOCATION, "42.3601,-71.0589"), (FORECAST_DAYS, "3")];

#[tokio::test]
async fn polls_publish_forecast_and_stop_cleanly() {
    let app = set_app_state(START, Arc::new(provider_with(FORECAST_US)), &CONFIGURED);
    let (_stop_tx, stop_rx) = tokio::sync::watch::channel(false);

    run_node_server(app.app_state.clone(), stop_rx, Some(2)).await.unwrap();

    assert_eq!(app.time_provider.sleeps(), 2);
    assert_eq!(app.host.last("forecast_0", drv::GV20), Some((0.174, 120)));
    assert_eq!(app.host.last("forecast_1", drv::GV20), Some((0.191, 120)));
    assert!(app.host.published("forecast_2", drv::GV0).is_empty());
    // the first poll forces, the second finds nothing new
    assert_eq!(app.host.published("forecast_0", drv::GV0).len(), 1);
    assert_eq!(app.host.last(ADDRESS, drv::ST), Some((0., 2)));
    assert_eq!(app.db.load_drivers("forecast_0").unwrap().len(), 18);
}

#[tokio::test]
async fn unconfigured_server_never_calls_provider() {
    let mut provider = MockProvider::new();
    provider.expect_fetch().times(0);
    let app = set_app_state(START, Arc::new(provider), &[]);

    start_node_server(&app.app_state).await.unwrap();
    assert_eq!(query_conditions(&app.app_state, true).await.unwrap(), 0);
    assert_eq!(app.host.notice_keys(), vec![API_KEY.to_owned(), LOCATION.to_owned()]);
}

#[tokio::test]
async fn failed_fetch_skips_the_poll() {
    let app = set_app_state(START, Arc::new(failing_provider()), &CONFIGURED);
    start_node_server(&app.app_state).await.unwrap();
    assert!(query_conditions(&app.app_state, false).await.is_err());
    assert!(app.host.published(ADDRESS, drv::CLITEMP).is_empty());

    let (_stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    assert!(run_node_server(app.app_state.clone(), stop_rx, Some(1)).await.is_ok());
}

#[tokio::test]
async fn saved_params_win_over_config() {
    let app = set_app_state(START, Arc::new(provider_with(FORECAST_US)), &CONFIGURED);
    let saved: BTreeMap<&str, &str> =
        BTreeMap::from([(API_KEY, "abc"), (LOCATION, "here"), (FORECAST_DAYS, "1"), (UNITS, "uk2")]);
    app.db.set_param(CUSTOM_PARAMS_KEY, &serde_json::to_string(&saved).unwrap()).unwrap();

    start_node_server(&app.app_state).await.unwrap();
    query_conditions(&app.app_state, true).await.unwrap();

    let controller = app.app_state.controller.lock().await;
    assert_eq!(controller.params.location, "here");
    assert_eq!(controller.nodes.len(), 2);
    // uk2 shows et0 in millimeters
    assert_eq!(app.host.last("forecast_0", drv::GV20).map(|(_, uom)| uom), Some(106));
}

#[tokio::test]
async fn stop_before_first_poll() {
    let mut provider = MockProvider::new();
    provider.expect_fetch().times(0);
    let app = set_app_state(START, Arc::new(provider), &CONFIGURED);
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    stop_tx.send(true).unwrap();

    run_node_server(app.app_state.clone(), stop_rx, None).await.unwrap();
    assert_eq!(app.host.published(ADDRESS, drv::ST), vec![(1., 2), (0., 2)]);
}

#[tokio::test]
async fn log_level_is_validated_and_saved() {
    let app = set_app_state(START, Arc::new(provider_with(FORECAST_US)), &CONFIGURED);
    app.db.set_param(LOG_LEVEL_KEY, "warn").unwrap();
    start_node_server(&app.app_state).await.unwrap();
    assert_eq!(app.db.get_param(LOG_LEVEL_KEY).unwrap().as_deref(), Some("warn"));

    set_logging_level(&app.app_state, " DEBUG ").unwrap();
    assert_eq!(app.db.get_param(LOG_LEVEL_KEY).unwrap().as_deref(), Some("debug"));

    let err = set_logging_level(&app.app_state, "loud").unwrap_err();
    assert!(matches!(err, AppError::Logging(_)));
    assert_eq!(app.db.get_param(LOG_LEVEL_KEY).unwrap().as_deref(), Some("debug"));
}
