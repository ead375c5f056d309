//! Server configuration parsed from environment variables.
//!
//! Every value has a default so a bare `cargo leptos watch` works against a
//! backend on `localhost:8000`. A value that is present but malformed is an
//! error rather than a silent fallback.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_UPSTREAM_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PROXY_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Reasons the environment does not describe a usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("invalid API_BASE_URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid API_BASE_URL '{value}': scheme '{scheme}' is not http or https")]
    UnsupportedScheme { value: String, scheme: String },

    #[error("invalid API_BASE_URL '{0}': no host")]
    MissingHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Upstream API root without a trailing slash; `/api/x` maps to `{api_base_url}/x`.
    pub api_base_url: String,
    pub timeouts: UpstreamTimeouts,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_BASE_URL`: default `http://localhost:8000/api`
    /// - `UPSTREAM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 5
    /// - `PROXY_BODY_LIMIT_BYTES`: default 10 MiB
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let api_base_url = parse_base_url(
            std::env::var("API_BASE_URL")
                .ok()
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE_URL),
        )?;
        let timeouts = UpstreamTimeouts {
            request_secs: env_parse("UPSTREAM_REQUEST_TIMEOUT_SECS", DEFAULT_UPSTREAM_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("UPSTREAM_CONNECT_TIMEOUT_SECS", DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS)?,
        };
        let body_limit_bytes = env_parse("PROXY_BODY_LIMIT_BYTES", DEFAULT_PROXY_BODY_LIMIT_BYTES)?;

        Ok(Self { port, api_base_url, timeouts, body_limit_bytes })
    }
}

fn env_parse<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(default),
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl { value: raw.to_owned(), source })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme { value: raw.to_owned(), scheme: url.scheme().to_owned() });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::MissingHost(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}
