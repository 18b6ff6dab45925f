use crate::{
    config::params::Params,
    error::AppError,
    weather::{client::WeatherProvider, model::ForecastResponse},
};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub Provider {}
    #[async_trait]
    impl WeatherProvider for Provider {
        async fn fetch(&self, params: &Params) -> Result<ForecastResponse, AppError>;
    }
}

/// Provider answering every request with `body`.
pub fn provider_with(body: &'static str) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_fetch().returning(move |_| ForecastResponse::from_json(body));
    provider
}

/// Provider whose requests always fail.
pub fn failing_provider() -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_fetch().returning(|_| Err(AppError::Config("no network in tests".to_owned())));
    provider
}
