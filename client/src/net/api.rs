//! REST API helpers for the AOI backend and login.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, relative to the
//! serving origin so the server's `/api` proxy handles them.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so failed requests degrade
//! into a toast without crashing hydration. An AOI call answered with `401`
//! trades the cached refresh token for a new access token and is sent once
//! more. A `401` that survives that is surfaced as its own variant so the
//! dashboard can drop the session and go back to `/login`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

use super::types::{Aoi, LoginRequest, LoginResponse};
#[cfg(any(test, feature = "hydrate"))]
use super::types::TokenRefreshResponse;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::session;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::storage::KeyValueStore;

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("request failed: {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message shown to the user on the login form.
    #[must_use]
    pub fn login_message(&self) -> String {
        match self {
            Self::Unauthorized | Self::Status(400) => "Invalid username or password.".to_owned(),
            Self::Network(_) => "Could not reach the server. Try again.".to_owned(),
            other => format!("Login failed: {other}"),
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
/// `GET /api/aois/` answers either a bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AoiListResponse {
    Plain(Vec<Aoi>),
    Paged { results: Vec<Aoi> },
}

#[cfg(any(test, feature = "hydrate"))]
impl AoiListResponse {
    fn into_items(self) -> Vec<Aoi> {
        match self {
            Self::Plain(items) | Self::Paged { results: items } => items,
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
const LOGIN_ENDPOINT: &str = "/api/auth/login/";

#[cfg(any(test, feature = "hydrate"))]
const REFRESH_ENDPOINT: &str = "/api/auth/token/refresh/";

#[cfg(any(test, feature = "hydrate"))]
fn aoi_collection_endpoint() -> &'static str {
    "/api/aois/"
}

#[cfg(any(test, feature = "hydrate"))]
fn aoi_endpoint(id: i64) -> String {
    format!("/api/aois/{id}/")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(|t| format!("Bearer {t}"))
}

/// Map a response status onto `Ok` for 2xx and the matching error otherwise.
#[cfg(any(test, feature = "hydrate"))]
fn check_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        other => Err(ApiError::Status(other)),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_aoi_list(body: &str) -> Result<Vec<Aoi>, ApiError> {
    serde_json::from_str::<AoiListResponse>(body)
        .map(AoiListResponse::into_items)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Store the tokens of a refresh response: always the new access token, and
/// the refresh token only when the backend rotated it.
#[cfg(any(test, feature = "hydrate"))]
fn apply_token_refresh(store: &impl KeyValueStore, body: &TokenRefreshResponse) -> Result<(), ApiError> {
    let access = body
        .access
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Decode("refresh response carries no access token".to_owned()))?;
    session::save_auth_token(store, access);
    if let Some(refresh) = body.refresh.as_deref().filter(|t| !t.is_empty()) {
        session::save_refresh_token(store, refresh);
    }
    Ok(())
}

#[cfg(feature = "hydrate")]
async fn refresh_access_token() -> Result<(), ApiError> {
    let store = crate::util::storage::BrowserStorage;
    let refresh = session::get_refresh_token(&store).ok_or(ApiError::Unauthorized)?;
    let resp = gloo_net::http::Request::post(REFRESH_ENDPOINT)
        .json(&super::types::TokenRefreshRequest { refresh })
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    let body: TokenRefreshResponse = read_json(resp).await?;
    apply_token_refresh(&store, &body)
}

/// Send the request `build` produces. On `401`, refresh the access token
/// and send a freshly built request once more; if the refresh fails the
/// original `401` response is returned.
#[cfg(feature = "hydrate")]
async fn send_authorized(
    build: impl Fn() -> Result<gloo_net::http::Request, gloo_net::Error>,
) -> Result<gloo_net::http::Response, ApiError> {
    let resp = build().map_err(network)?.send().await.map_err(network)?;
    if resp.status() != 401 {
        return Ok(resp);
    }
    if let Err(e) = refresh_access_token().await {
        log::warn!("token refresh failed: {e}");
        return Ok(resp);
    }
    log::info!("access token refreshed, retrying request");
    build().map_err(network)?.send().await.map_err(network)
}

#[cfg(feature = "hydrate")]
fn authorized(builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    let token = crate::util::session::get_auth_token(&crate::util::storage::BrowserStorage);
    match bearer_header(token.as_deref()) {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

#[cfg(feature = "hydrate")]
fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    check_status(resp.status())?;
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch every AOI via `GET /api/aois/`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the backend answers with a
/// non-2xx status, or the body is not a list of AOIs.
pub async fn list_aois() -> Result<Vec<Aoi>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_authorized(|| authorized(gloo_net::http::Request::get(aoi_collection_endpoint())).build()).await?;
        check_status(resp.status())?;
        let body = resp.text().await.map_err(network)?;
        parse_aoi_list(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Create an AOI via `POST /api/aois/` and return the stored record.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn create_aoi(aoi: &Aoi) -> Result<Aoi, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_authorized(|| authorized(gloo_net::http::Request::post(aoi_collection_endpoint())).json(aoi)).await?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = aoi;
        Err(ApiError::Unavailable)
    }
}

/// Replace an AOI via `PUT /api/aois/{id}/` and return the stored record.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn update_aoi(id: i64, aoi: &Aoi) -> Result<Aoi, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_authorized(|| authorized(gloo_net::http::Request::put(&aoi_endpoint(id))).json(aoi)).await?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, aoi);
        Err(ApiError::Unavailable)
    }
}

/// Delete an AOI via `DELETE /api/aois/{id}/`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn delete_aoi(id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_authorized(|| authorized(gloo_net::http::Request::delete(&aoi_endpoint(id))).build()).await?;
        check_status(resp.status())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// Sign in via `POST /api/auth/login/`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the credentials are
/// rejected, or the response carries no token.
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        let body: LoginResponse = read_json(resp).await?;
        if body.session_token().is_none() {
            return Err(ApiError::Decode("response carries no token".to_owned()));
        }
        Ok(body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}
