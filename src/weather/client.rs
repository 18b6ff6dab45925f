use super::model::ForecastResponse;
use crate::{config::params::Params, config::Weather, error::AppError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, params: &Params) -> Result<ForecastResponse, AppError>;
}

pub struct DarkSkyClient {
    client: reqwest::Client,
    base_url: String,
}

impl DarkSkyClient {
    pub fn new(cfg: &Weather) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(cfg.timeout_secs)).build()?;
        Ok(Self { client, base_url: cfg.base_url.trim_end_matches('/').to_owned() })
    }

    pub fn request_url(&self, params: &Params) -> String {
        format!("{}/{}/{}?units={}", self.base_url, params.api_key, params.location, params.units)
    }
}

#[async_trait]
impl WeatherProvider for DarkSkyClient {
    async fn fetch(&self, params: &Params) -> Result<ForecastResponse, AppError> {
        let url = self.request_url(params);
        debug!(location = %params.location, units = %params.units, "Requesting forecast.");
        // error bodies still carry JSON with an `error` key, so the status is not checked
        let body = self.client.get(&url).send().await?.text().await?;
        ForecastResponse::from_json(&body)
    }
}
