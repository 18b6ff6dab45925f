use crate::{
    config::params::{Notice, ParamUpdate},
    error::AppError,
    node_server::{query_conditions, set_logging_level, AppState},
    nodes::Node,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{collections::BTreeMap, net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::watch;
use tracing::{error, info};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Logging(_) | AppError::Config(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(_) | AppError::Http(_) | AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(error = %self, "Request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogLevelRequest {
    pub level: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PollResponse {
    pub published: usize,
}

/// A node as listed by `GET /nodes`, with its conditions driver spelled out.
#[derive(Serialize, Debug, Clone)]
pub struct NodeStatus {
    #[serde(flatten)]
    pub node: Node,
    pub conditions: Option<String>,
}

impl From<&Node> for NodeStatus {
    fn from(node: &Node) -> Self {
        Self { node: node.clone(), conditions: node.conditions().map(|icon| icon.to_string()) }
    }
}

pub async fn get_nodes(State(app_state): State<Arc<AppState>>) -> Json<Vec<NodeStatus>> {
    Json(app_state.controller.lock().await.nodes.values().map(NodeStatus::from).collect())
}

pub async fn get_notices(State(app_state): State<Arc<AppState>>) -> Json<Vec<Notice>> {
    Json(app_state.controller.lock().await.notices())
}

pub async fn discover(State(app_state): State<Arc<AppState>>) -> Result<Json<&'static str>, AppError> {
    app_state.controller.lock().await.discover(app_state.host.as_ref(), app_state.db.as_ref())?;
    Ok(Json("Discovery done"))
}

/// Re-reports every driver, then polls the provider with every driver forced out.
pub async fn query(State(app_state): State<Arc<AppState>>) -> Result<Json<PollResponse>, AppError> {
    app_state.controller.lock().await.query(app_state.host.as_ref())?;
    let published = query_conditions(&app_state, true).await?;
    Ok(Json(PollResponse { published }))
}

pub async fn clear_notices(State(app_state): State<Arc<AppState>>) -> Result<Json<&'static str>, AppError> {
    app_state.controller.lock().await.remove_notices_all(app_state.host.as_ref())?;
    Ok(Json("Notices removed"))
}

pub async fn log_level(
    State(app_state): State<Arc<AppState>>, Json(req): Json<LogLevelRequest>,
) -> Result<Json<&'static str>, AppError> {
    set_logging_level(&app_state, &req.level)?;
    Ok(Json("Log level set"))
}

pub async fn params(
    State(app_state): State<Arc<AppState>>, Json(map): Json<BTreeMap<String, String>>,
) -> Result<Json<ParamUpdate>, AppError> {
    let update =
        app_state.controller.lock().await.process_config(&map, app_state.host.as_ref(), app_state.db.as_ref())?;
    Ok(Json(update))
}

pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/nodes", get(get_nodes))
        .route("/notices", get(get_notices))
        .route("/notices/clear", post(clear_notices))
        .route("/discover", post(discover))
        .route("/query", post(query))
        .route("/log_level", post(log_level))
        .route("/params", post(params))
        .with_state(app_state)
}

/// Serves the API until `stop_signal` flips, then drains open connections.
pub async fn run_web_server(
    app_state: Arc<AppState>, address: String, mut stop_signal: watch::Receiver<bool>,
) -> Result<(), AppError> {
    let addr: SocketAddr = address.parse().map_err(|_| AppError::Config(format!("invalid address {}", address)))?;
    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        let _ = stop_signal.changed().await;
        shutdown.graceful_shutdown(Some(Duration::from_secs(5)));
    });

    info!(address = %addr, "Starting HTTP server");
    axum_server::bind(addr).handle(handle).serve(router(app_state).into_make_service()).await?;
    info!("HTTP server stopped.");
    Ok(())
}
