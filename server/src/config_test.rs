use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

/// Serializes tests that touch process environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`].
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("API_BASE_URL");
        std::env::remove_var("UPSTREAM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("UPSTREAM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("PROXY_BODY_LIMIT_BYTES");
    }
}

#[test]
fn from_env_uses_defaults() {
    let _env = env_lock();
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        UpstreamTimeouts {
            request_secs: DEFAULT_UPSTREAM_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS
        }
    );
    assert_eq!(cfg.body_limit_bytes, DEFAULT_PROXY_BODY_LIMIT_BYTES);
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("API_BASE_URL", "https://aoi.example.test/api/");
        std::env::set_var("UPSTREAM_REQUEST_TIMEOUT_SECS", "12");
        std::env::set_var("UPSTREAM_CONNECT_TIMEOUT_SECS", " 2 ");
        std::env::set_var("PROXY_BODY_LIMIT_BYTES", "1024");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_base_url, "https://aoi.example.test/api");
    assert_eq!(cfg.timeouts, UpstreamTimeouts { request_secs: 12, connect_secs: 2 });
    assert_eq!(cfg.body_limit_bytes, 1024);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    let _env = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "eighty");
    }

    assert_eq!(
        ServerConfig::from_env(),
        Err(ConfigError::InvalidNumber { var: "PORT", value: "eighty".to_owned() })
    );

    unsafe { clear_server_env() };
}

#[test]
fn parse_base_url_accepts_http_and_https() {
    assert_eq!(parse_base_url("http://localhost:8000/api/"), Ok("http://localhost:8000/api".to_owned()));
    assert_eq!(parse_base_url(" https://aoi.example.test "), Ok("https://aoi.example.test".to_owned()));
    assert_eq!(parse_base_url("http://127.0.0.1:9000/v1"), Ok("http://127.0.0.1:9000/v1".to_owned()));
}

#[test]
fn parse_base_url_rejects_other_schemes() {
    assert_eq!(
        parse_base_url("ftp://files.example.test"),
        Err(ConfigError::UnsupportedScheme { value: "ftp://files.example.test".to_owned(), scheme: "ftp".to_owned() })
    );
    // Without `//`, `localhost` parses as the scheme.
    assert!(matches!(parse_base_url("localhost:8000"), Err(ConfigError::UnsupportedScheme { .. })));
}

#[test]
fn parse_base_url_rejects_missing_or_malformed_hosts() {
    assert_eq!(
        parse_base_url("https://"),
        Err(ConfigError::InvalidUrl { value: "https://".to_owned(), source: url::ParseError::EmptyHost })
    );
    for raw in ["http://not a host", "https://?x", "http://:::", "not a url"] {
        assert!(parse_base_url(raw).is_err(), "{raw} should be rejected");
    }
}

#[test]
fn from_env_reports_bad_base_url() {
    let _env = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("API_BASE_URL", "http://not a host");
    }

    let err = ServerConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    assert!(err.to_string().starts_with("invalid API_BASE_URL 'http://not a host': "));

    unsafe { clear_server_env() };
}
