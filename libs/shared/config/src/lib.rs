use std::env;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REDIRECT_DELAY_SECS: u64 = 5;
pub const DEFAULT_HOME_TARGET: &str = "index.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub redirect_delay_secs: u64,
    pub home_target: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            redirect_delay_secs: DEFAULT_REDIRECT_DELAY_SECS,
            home_target: DEFAULT_HOME_TARGET.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("HOSPITAL_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("HOSPITAL_API_BASE_URL not set, using default");
                    DEFAULT_API_BASE_URL.to_string()
                }),
            redirect_delay_secs: match env::var("BOOKING_REDIRECT_DELAY_SECS") {
                Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!("BOOKING_REDIRECT_DELAY_SECS is not a number ({}), using default", raw);
                    DEFAULT_REDIRECT_DELAY_SECS
                }),
                Err(_) => DEFAULT_REDIRECT_DELAY_SECS,
            },
            home_target: env::var("BOOKING_HOME_TARGET")
                .unwrap_or_else(|_| DEFAULT_HOME_TARGET.to_string()),
        };

        if !config.is_configured() {
            warn!("API base URL {:?} does not look like an http(s) URL", config.api_base_url);
        }

        config
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_secs(self.redirect_delay_secs)
    }
}
