use super::*;
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

fn token_with(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

const NOW_MS: f64 = 1_700_000_000_000.0;

// =============================================================
// decode
// =============================================================

#[test]
fn decodes_known_claims_and_keeps_the_rest() {
    let token = token_with(&serde_json::json!({
        "user_id": 42,
        "email": "ops@example.com",
        "username": "ops",
        "exp": 1_700_000_600,
        "iat": 1_700_000_000,
        "token_type": "access"
    }));
    let payload = decode_jwt(&token).unwrap();
    assert_eq!(payload.email.as_deref(), Some("ops@example.com"));
    assert_eq!(payload.username.as_deref(), Some("ops"));
    assert_eq!(payload.exp, Some(1_700_000_600.0));
    assert_eq!(payload.user_id(), Some(42));
    assert_eq!(payload.extra.get("token_type"), Some(&serde_json::json!("access")));
}

#[test]
fn id_claim_wins_over_user_id() {
    let token = token_with(&serde_json::json!({ "id": 1, "user_id": 2 }));
    assert_eq!(decode_jwt(&token).unwrap().user_id(), Some(1));
}

#[test]
fn wrong_segment_count_is_none() {
    assert!(decode_jwt("").is_none());
    assert!(decode_jwt("onlyone").is_none());
    assert!(decode_jwt("two.parts").is_none());
    assert!(decode_jwt("a.b.c.d").is_none());
    assert!(matches!(try_decode_jwt("two.parts"), Err(JwtError::Format(2))));
}

#[test]
fn garbage_payload_is_none() {
    assert!(matches!(try_decode_jwt("a.!!!.c"), Err(JwtError::Base64(_))));
    let not_json = URL_SAFE_NO_PAD.encode("hello");
    assert!(matches!(try_decode_jwt(&format!("a.{not_json}.c")), Err(JwtError::Json(_))));
    let not_utf8 = URL_SAFE_NO_PAD.encode([0xff_u8, 0xfe, 0xfd]);
    assert!(matches!(try_decode_jwt(&format!("a.{not_utf8}.c")), Err(JwtError::Utf8(_))));
}

#[test]
fn padded_standard_base64_is_tolerated() {
    // "?>" puts a '+' into standard base64; 28 bytes force "==" padding.
    let body = STANDARD.encode(r#"{"exp":1,"username":"a?>bc"}"#);
    assert!(body.contains('+'));
    assert!(body.ends_with("=="));
    let payload = decode_jwt(&format!("h.{body}.s")).unwrap();
    assert_eq!(payload.username.as_deref(), Some("a?>bc"));
}

#[test]
fn non_canonical_trailing_bits_are_tolerated() {
    // Canonical encoding of {"a":1} is "eyJhIjoxfQ"; 'f' sets the unused low bits.
    assert!(URL_SAFE_NO_PAD.decode("eyJhIjoxff").is_err());
    let payload = decode_jwt("h.eyJhIjoxff.s").unwrap();
    assert_eq!(payload.extra.get("a"), Some(&serde_json::json!(1)));
}

#[test]
fn json_array_payload_is_rejected() {
    let body = URL_SAFE_NO_PAD.encode("[1,2,3]");
    assert!(decode_jwt(&format!("h.{body}.s")).is_none());
}

// =============================================================
// expiry
// =============================================================

#[test]
fn missing_exp_is_expired() {
    let token = token_with(&serde_json::json!({ "username": "ops" }));
    assert!(is_token_expired_at(&token, NOW_MS));
    assert!(is_token_expired(&token));
}

#[test]
fn zero_exp_is_expired() {
    let token = token_with(&serde_json::json!({ "exp": 0 }));
    assert!(is_token_expired_at(&token, 0.0));
}

#[test]
fn past_exp_is_expired() {
    let token = token_with(&serde_json::json!({ "exp": 1_699_999_999 }));
    assert!(is_token_expired_at(&token, NOW_MS));
}

#[test]
fn future_exp_is_not_expired() {
    let token = token_with(&serde_json::json!({ "exp": 1_700_000_001 }));
    assert!(!is_token_expired_at(&token, NOW_MS));
}

#[test]
fn exp_equal_to_now_is_not_expired() {
    let token = token_with(&serde_json::json!({ "exp": 1_700_000_000 }));
    assert!(!is_token_expired_at(&token, NOW_MS));
}

#[test]
fn undecodable_token_is_expired() {
    assert!(is_token_expired_at("not-a-jwt", NOW_MS));
}

#[test]
fn far_future_token_is_valid_now() {
    let token = token_with(&serde_json::json!({ "exp": 4_102_444_800_i64, "username": "ops" }));
    assert!(!is_token_expired(&token));
    assert_eq!(user_from_token(&token).and_then(|p| p.username), Some("ops".to_owned()));
}

#[test]
fn user_from_token_rejects_empty_and_expired() {
    assert!(user_from_token("").is_none());
    let expired = token_with(&serde_json::json!({ "exp": 1 }));
    assert!(user_from_token(&expired).is_none());
}

#[test]
fn looks_like_jwt_counts_segments() {
    assert!(looks_like_jwt("a.b.c"));
    assert!(!looks_like_jwt("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b"));
}
