use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOG_CLEAR_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: String,
    /// Unset means requests wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dashboard {
    pub log_clear_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub dashboard: Dashboard,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("dashboard.log_clear_delay_ms", DEFAULT_LOG_CLEAR_DELAY_MS)?
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("COVERED_CALL").separator("__"));

        if let Ok(base_url) = std::env::var("API_BASE_URL") {
            builder = builder.set_override("api.base_url", base_url)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    pub fn log_clear_delay(&self) -> Duration {
        Duration::from_millis(self.dashboard.log_clear_delay_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: Api {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: None,
            },
            dashboard: Dashboard {
                log_clear_delay_ms: DEFAULT_LOG_CLEAR_DELAY_MS,
            },
        }
    }
}
