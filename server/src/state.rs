//! State handed to every proxy and health handler.
//!
//! DESIGN
//! ======
//! Handlers receive `AppState` through Axum's `State` extractor. It
//! holds the parsed configuration and one pooled `reqwest::Client` reused by
//! every proxied request.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with an upstream client honouring the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialised.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { http, config: Arc::new(config) })
    }
}
