//! `/api/*` forwarding to the external AOI backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this server. Requests under `/api` are
//! replayed against `API_BASE_URL` with the same method, query, body, and a
//! small allow-list of headers; the upstream status and body come back
//! unchanged. Each request gets an `x-request-id` so both sides can be
//! correlated in logs.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use uuid::Uuid;

use crate::state::AppState;

/// Request headers copied to the upstream request.
const FORWARDED_REQUEST_HEADERS: [HeaderName; 3] = [AUTHORIZATION, CONTENT_TYPE, ACCEPT];

/// Upstream response headers copied back to the browser.
const FORWARDED_RESPONSE_HEADERS: [HeaderName; 1] = [CONTENT_TYPE];

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream URL for a proxied path. `path` is the part after `/api`.
pub(crate) fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let path = path.trim_start_matches('/');
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{base}/{path}?{q}"),
        None => format!("{base}/{path}"),
    }
}

/// Path below the `/api` prefix.
pub(crate) fn strip_api_prefix(path: &str) -> &str {
    path.strip_prefix("/api").unwrap_or(path)
}

/// Copy only the allow-listed headers from `source`.
pub(crate) fn pick_headers(source: &HeaderMap, names: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in names {
        for value in source.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Status returned when the upstream could not be reached.
pub(crate) fn upstream_failure_status(timed_out: bool) -> StatusCode {
    if timed_out { StatusCode::GATEWAY_TIMEOUT } else { StatusCode::BAD_GATEWAY }
}

/// Forward one request to the upstream API.
pub async fn forward(State(state): State<AppState>, req: Request) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("proxy", %request_id, method = %req.method(), path = %req.uri().path());
    relay(state, req, request_id).instrument(span).await
}

async fn relay(state: AppState, req: Request, request_id: Uuid) -> Response {
    let (parts, body) = req.into_parts();
    let url = upstream_url(
        &state.config.api_base_url,
        strip_api_prefix(parts.uri.path()),
        parts.uri.query(),
    );

    let body = match to_bytes(body, state.config.body_limit_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "request body rejected");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let mut headers = pick_headers(&parts.headers, &FORWARDED_REQUEST_HEADERS);
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    let upstream = state
        .http
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await;
    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(error = %e, %url, "upstream request failed");
            return upstream_failure_status(e.is_timeout()).into_response();
        }
    };

    let status = upstream.status();
    let mut response_headers = pick_headers(upstream.headers(), &FORWARDED_RESPONSE_HEADERS);
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "upstream body read failed");
            return upstream_failure_status(e.is_timeout()).into_response();
        }
    };
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response_headers.insert(REQUEST_ID_HEADER, value);
    }

    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), "upstream error");
    } else {
        tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "upstream ok");
    }
    (status, response_headers, Body::from(bytes)).into_response()
}
