pub mod fixtures;
pub mod mock_db;
pub mod mock_host;
pub mod mock_provider;
pub mod mock_time;

use crate::{node_server::AppState, weather::client::WeatherProvider};
use mock_db::MockDatabase;
use mock_host::MemoryHost;
use mock_time::MockTimeProvider;
use std::{collections::BTreeMap, sync::Arc};

/// Application state over in-memory doubles, with handles kept for assertions.
pub struct TestApp {
    pub app_state: Arc<AppState>,
    pub host: Arc<MemoryHost>,
    pub db: Arc<MockDatabase>,
    pub time_provider: Arc<MockTimeProvider>,
}

pub fn set_app_state(start_time: i64, provider: Arc<dyn WeatherProvider>, params: &[(&str, &str)]) -> TestApp {
    let host = Arc::new(MemoryHost::default());
    let db = Arc::new(MockDatabase::new());
    let time_provider = Arc::new(MockTimeProvider::new(start_time));
    let mut app_state = AppState::new(provider, host.clone(), db.clone(), time_provider.clone());
    app_state.default_params = params.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<BTreeMap<_, _>>();
    TestApp { app_state: Arc::new(app_state), host, db, time_provider }
}
