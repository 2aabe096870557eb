use std::{env, str::FromStr, time::Duration};

use crate::error::ConfigError;
use crate::services::chat_client::DEFAULT_ENDPOINT_PATH;

#[derive(Debug, Clone)]
pub struct Config {
    // Widget host
    pub host: String,
    pub port: u16,
    pub widget_ttl: Duration,

    // Chat backend
    pub backend_url: String,
    pub endpoint_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ttl_secs: u64 = parse_or(&lookup, "CHAT_WIDGET_TTL_SECS", 1800)?;

        Ok(Config {
            host: lookup("CHAT_WIDGET_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "CHAT_WIDGET_PORT", 3000)?,
            widget_ttl: Duration::from_secs(ttl_secs),

            backend_url: lookup("CHAT_BACKEND_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            endpoint_path: lookup("CHAT_ENDPOINT_PATH")
                .unwrap_or_else(|| DEFAULT_ENDPOINT_PATH.to_string()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
