use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

#[async_trait]
pub trait TimeProvider: Send + Sync + Debug {
    fn now(&self) -> i64; // Unix UTC timestamp
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug)]
pub struct RealTimeProvider;

#[async_trait]
impl TimeProvider for RealTimeProvider {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
