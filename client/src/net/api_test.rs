use super::*;

#[test]
fn aoi_endpoints_format_expected_paths() {
    assert_eq!(aoi_collection_endpoint(), "/api/aois/");
    assert_eq!(aoi_endpoint(42), "/api/aois/42/");
    assert_eq!(LOGIN_ENDPOINT, "/api/auth/login/");
    assert_eq!(REFRESH_ENDPOINT, "/api/auth/token/refresh/");
}

#[test]
fn bearer_header_requires_non_empty_token() {
    assert_eq!(bearer_header(Some("abc")), Some("Bearer abc".to_owned()));
    assert_eq!(bearer_header(Some("")), None);
    assert_eq!(bearer_header(None), None);
}

#[test]
fn check_status_maps_codes() {
    assert_eq!(check_status(200), Ok(()));
    assert_eq!(check_status(204), Ok(()));
    assert_eq!(check_status(401), Err(ApiError::Unauthorized));
    assert_eq!(check_status(404), Err(ApiError::Status(404)));
    assert_eq!(check_status(502), Err(ApiError::Status(502)));
}

#[test]
fn parse_aoi_list_accepts_plain_array() {
    let body = r#"[{"id":1,"name":"A","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]"#;
    let items = parse_aoi_list(body).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, Some(1));
}

#[test]
fn parse_aoi_list_accepts_paginated_envelope() {
    let body = r#"{"count":1,"next":null,"results":[{"id":2,"name":"B","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
    let items = parse_aoi_list(body).unwrap();
    assert_eq!(items.iter().map(|a| a.id).collect::<Vec<_>>(), vec![Some(2)]);
}

#[test]
fn parse_aoi_list_keeps_altitudes() {
    let body = r#"[
        {"id":3,"name":"Ridge","geometry":{"type":"Polygon","coordinates":[[[0,0,120],[1,0,120],[1,1,135],[0,0,120]]]}},
        {"id":4,"name":"Flat","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}
    ]"#;
    let items = parse_aoi_list(body).unwrap();
    assert_eq!(items.len(), 2);
    let coords = serde_json::to_value(&items[0].geometry).unwrap()["coordinates"].clone();
    assert_eq!(coords, serde_json::json!([[[0.0, 0.0, 120.0], [1.0, 0.0, 120.0], [1.0, 1.0, 135.0], [0.0, 0.0, 120.0]]]));
}

#[test]
fn parse_aoi_list_rejects_other_shapes() {
    assert!(matches!(parse_aoi_list(r#"{"detail":"nope"}"#), Err(ApiError::Decode(_))));
}

#[test]
fn login_message_is_friendly_for_bad_credentials() {
    assert_eq!(ApiError::Unauthorized.login_message(), "Invalid username or password.");
    assert_eq!(ApiError::Status(400).login_message(), "Invalid username or password.");
    assert_eq!(ApiError::Status(500).login_message(), "Login failed: request failed: 500");
}

#[test]
fn api_error_display() {
    assert_eq!(ApiError::Unavailable.to_string(), "not available on server");
    assert_eq!(ApiError::Status(503).to_string(), "request failed: 503");
}

// =============================================================
// Token refresh
// =============================================================

#[test]
fn token_refresh_replaces_access_and_keeps_refresh() {
    let store = crate::util::storage::MemoryStorage::new();
    session::save_auth_token(&store, "old-access");
    session::save_refresh_token(&store, "refresh-1");

    let body: TokenRefreshResponse = serde_json::from_str(r#"{"access":"new-access"}"#).unwrap();
    apply_token_refresh(&store, &body).unwrap();

    assert_eq!(session::get_auth_token(&store), Some("new-access".to_owned()));
    assert_eq!(session::get_refresh_token(&store), Some("refresh-1".to_owned()));
}

#[test]
fn token_refresh_stores_rotated_refresh_token() {
    let store = crate::util::storage::MemoryStorage::new();
    session::save_refresh_token(&store, "refresh-1");

    let body = TokenRefreshResponse { access: Some("a2".to_owned()), refresh: Some("refresh-2".to_owned()) };
    apply_token_refresh(&store, &body).unwrap();

    assert_eq!(session::get_auth_token(&store), Some("a2".to_owned()));
    assert_eq!(session::get_refresh_token(&store), Some("refresh-2".to_owned()));
}

#[test]
fn token_refresh_without_access_leaves_session_untouched() {
    let store = crate::util::storage::MemoryStorage::new();
    session::save_auth_token(&store, "old-access");

    let body = TokenRefreshResponse { access: Some(String::new()), refresh: Some("r".to_owned()) };
    assert!(matches!(apply_token_refresh(&store, &body), Err(ApiError::Decode(_))));
    assert_eq!(session::get_auth_token(&store), Some("old-access".to_owned()));
    assert_eq!(session::get_refresh_token(&store), None);
}
