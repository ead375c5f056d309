//! Client-side JWT payload decoding and expiry checks.
//!
//! The signature is never verified. Payloads decoded here are an untrusted
//! bag of claims, good for showing a username or hiding UI after expiry and
//! nothing else; the backend remains the only authority on access.

#[cfg(test)]
#[path = "jwt_test.rs"]
mod jwt_test;

use base64::Engine as _;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

/// Lenient base64url decoder: no padding required and stray bits in the
/// final symbol ignored, matching what browsers' `atob` accepts.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Reasons a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("invalid JWT format: expected 3 segments, found {0}")]
    Format(usize),
    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("payload is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decoded claims. Typed fields cover what the UI reads; every other claim
/// lands in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JwtPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JwtPayload {
    /// Numeric user id from the `id` claim, falling back to `user_id`.
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        ["id", "user_id"]
            .into_iter()
            .find_map(|k| self.extra.get(k).and_then(serde_json::Value::as_i64))
    }

    /// Whether the token is expired at `now_ms` (milliseconds since epoch).
    /// A missing, zero, or negative `exp` counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now_ms: f64) -> bool {
        match self.exp {
            Some(exp) if exp > 0.0 => exp * 1000.0 < now_ms,
            _ => true,
        }
    }
}

/// Decode the payload segment of `token`.
///
/// # Errors
///
/// Returns [`JwtError::Format`] unless the token has exactly three
/// dot-separated segments, and the matching variant when the middle segment
/// is not base64url-encoded UTF-8 JSON.
pub fn try_decode_jwt(token: &str) -> Result<JwtPayload, JwtError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = parts.as_slice() else {
        return Err(JwtError::Format(parts.len()));
    };
    // Tolerate standard-alphabet and padded encoders.
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = PAYLOAD_ENGINE.decode(normalized)?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decode the payload of `token`, logging and returning `None` on failure.
pub fn decode_jwt(token: &str) -> Option<JwtPayload> {
    match try_decode_jwt(token) {
        Ok(payload) => Some(payload),
        Err(e) => {
            log::warn!("error decoding JWT: {e}");
            None
        }
    }
}

/// Whether `token` is expired (or undecodable) at `now_ms`.
#[must_use]
pub fn is_token_expired_at(token: &str, now_ms: f64) -> bool {
    decode_jwt(token).map_or(true, |payload| payload.is_expired_at(now_ms))
}

/// Whether `token` is expired (or undecodable) right now.
#[must_use]
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, now_ms())
}

/// Claims of a non-empty, unexpired token.
#[must_use]
pub fn user_from_token(token: &str) -> Option<JwtPayload> {
    if token.is_empty() {
        return None;
    }
    decode_jwt(token).filter(|payload| !payload.is_expired_at(now_ms()))
}

/// Whether `token` has the three-segment shape of a JWT.
#[must_use]
pub fn looks_like_jwt(token: &str) -> bool {
    token.split('.').count() == 3
}

/// Wall-clock milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}
