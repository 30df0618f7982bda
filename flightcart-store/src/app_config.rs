use flightcart_core::UpstreamSettings;
use flightcart_shared::Masked;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub api_key: Masked<String>,
}

fn default_engine() -> String { "google_flights".to_string() }
fn default_language() -> String { "en".to_string() }
fn default_country() -> String { "us".to_string() }

impl UpstreamConfig {
    pub fn settings(&self) -> UpstreamSettings {
        UpstreamSettings {
            engine: self.engine.clone(),
            language: self.language.clone(),
            country: self.country.clone(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment and local overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FLIGHTCART__UPSTREAM__API_KEY=...` sets `upstream.api_key`
            .add_source(config::Environment::with_prefix("FLIGHTCART").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
