use crate::error::AppError;
use chrono::{DateTime, Datelike, Utc, Weekday};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
/// Returns `None` when a subscriber is already installed (tests).
pub fn start_log(default_level: &str) -> Option<LogHandle> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).try_init().ok().map(|_| handle)
}

pub fn set_log_level(handle: &LogHandle, level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(level).map_err(|e| AppError::Logging(e.to_string()))?;
    handle.reload(filter).map_err(|e| AppError::Logging(e.to_string()))
}

fn ts_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

pub fn get_week_day_from_ts(ts: i64) -> Weekday {
    ts_to_utc(ts).weekday()
}

/// 1-based day of the year, UTC.
pub fn day_of_year_from_ts(ts: i64) -> u32 {
    ts_to_utc(ts).ordinal()
}

pub fn ux_ts_to_string(ts: i64) -> String {
    ts_to_utc(ts).format("%Y-%m-%d %H:%M:%S").to_string()
}
