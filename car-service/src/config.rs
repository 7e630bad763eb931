//! Environment-driven configuration.
//!
//! | variable                    | default                 |
//! |-----------------------------|-------------------------|
//! | `CAR_SERVICE_ADDR`          | `127.0.0.1:8082`        |
//! | `PORT`                      | overrides the port only |
//! | `CLIENT_SERVICE_URL`        | `http://127.0.0.1:8081` |
//! | `CLIENT_SERVICE_TIMEOUT_MS` | `5000`                  |

use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8082";
const DEFAULT_CLIENT_SERVICE_URL: &str = "http://127.0.0.1:8081";
const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CAR_SERVICE_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid PORT {0:?}")]
    Port(String),
    #[error("CLIENT_SERVICE_URL must be an http(s) URL, got {0:?}")]
    ClientServiceUrl(String),
    #[error("invalid CLIENT_SERVICE_TIMEOUT_MS {0:?}")]
    Timeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub client_service_url: String,
    pub client_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("CAR_SERVICE_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let mut bind_addr: SocketAddr = raw_addr.parse().map_err(|source| ConfigError::BindAddr {
            value: raw_addr.clone(),
            source,
        })?;
        if let Some(port) = lookup("PORT") {
            bind_addr.set_port(port.parse().map_err(|_| ConfigError::Port(port))?);
        }

        let client_service_url =
            lookup("CLIENT_SERVICE_URL").unwrap_or_else(|| DEFAULT_CLIENT_SERVICE_URL.to_string());
        let usable = reqwest::Url::parse(&client_service_url)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
            .unwrap_or(false);
        if !usable {
            return Err(ConfigError::ClientServiceUrl(client_service_url));
        }

        let client_timeout = match lookup("CLIENT_SERVICE_TIMEOUT_MS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => return Err(ConfigError::Timeout(raw)),
            },
            None => Duration::from_millis(DEFAULT_CLIENT_TIMEOUT_MS),
        };

        Ok(Self {
            bind_addr,
            client_service_url,
            client_timeout,
        })
    }

    /// Pooled HTTP client shared by every remote lookup.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.client_timeout).build()
    }
}
