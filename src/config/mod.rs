pub mod params;
pub mod run_options;

use crate::error::AppError;
use run_options::Args;
use serde::Deserialize;
use std::{collections::BTreeMap, fs};

pub const CONFIG_FILE: &str = "./dsweather.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Database {
    pub name: String,
}

impl Default for Database {
    fn default() -> Self {
        Self { name: "dsweather.db".to_owned() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebServer {
    pub address: String,
}

impl Default for WebServer {
    fn default() -> Self {
        Self { address: "0.0.0.0:8080".to_owned() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Mqtt {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub topic_prefix: String,
    pub keep_alive_secs: u64,
}

impl Default for Mqtt {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 1883,
            client_id: "dsweather".to_owned(),
            topic_prefix: "udi/dsweather".to_owned(),
            keep_alive_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Weather {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Weather {
    fn default() -> Self {
        Self { base_url: "https://api.darksky.net/forecast".to_owned(), timeout_secs: 30 }
    }
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Polling {
    pub short_poll_secs: u64,
}

impl Default for Polling {
    fn default() -> Self {
        Self { short_poll_secs: 600 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Log {
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self { level: "info".to_owned() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: Database,
    pub web_server: WebServer,
    pub mqtt: Mqtt,
    pub weather: Weather,
    pub polling: Polling,
    pub log: Log,
    /// Initial custom parameters, keyed like the hub shows them ("APIKey", "Forecast Days", ...)
    pub params: BTreeMap<String, String>,
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, AppError> {
        if let Some(cfg_str) = &args.cfg_str {
            return Self::load_from_str(cfg_str);
        }
        if !args.cfg_file.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(&args.cfg_file)?;
        Self::load_from_str(&config_content)
    }

    pub fn load_from_str(config_str: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(config_str)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::load_from_str("").unwrap();
        assert_eq!(cfg.database.name, "dsweather.db");
        assert_eq!(cfg.polling.short_poll_secs, 600);
        assert_eq!(cfg.mqtt.port, 1883);
        assert!(cfg.params.is_empty());
    }

    #[test]
    fn partial_sections() {
        let cfg = Config::load_from_str(
            r#"
            [mqtt]
            host = "broker.local"

            [polling]
            short_poll_secs = 120

            [params]
            APIKey = "abc123"
            Location = "42.3601,-71.0589"
            "Forecast Days" = "3"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mqtt.host, "broker.local");
        assert_eq!(cfg.mqtt.port, 1883);
        assert_eq!(cfg.polling.short_poll_secs, 120);
        assert_eq!(cfg.params.get("Forecast Days").map(String::as_str), Some("3"));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(Config::load_from_str("[mqtt\nport = "), Err(AppError::Toml(_))));
    }

    #[test]
    fn load_prefers_inline_string() {
        let args = Args { cfg_file: "/nonexistent/dsweather.toml".into(), cfg_str: Some("[log]\nlevel = \"debug\"".to_owned()) };
        assert_eq!(Config::load(&args).unwrap().log.level, "debug");

        let args = Args { cfg_file: "/nonexistent/dsweather.toml".into(), cfg_str: None };
        assert_eq!(Config::load(&args).unwrap().log.level, "info");
    }
}
