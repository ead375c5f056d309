use super::*;
use crate::util::storage::MemoryStorage;

fn ada() -> User {
    let mut extra = serde_json::Map::new();
    extra.insert("is_verified".to_owned(), serde_json::json!(true));
    User { id: Some(1), email: Some("ada@example.com".to_owned()), username: Some("ada".to_owned()), extra }
}

#[test]
fn saved_user_reads_back_equal() {
    let store = MemoryStorage::new();
    save_user(&store, Some(&ada()));
    assert_eq!(get_user(&store), Some(ada()));
}

#[test]
fn cleared_user_reads_back_none() {
    let store = MemoryStorage::new();
    save_user(&store, Some(&ada()));
    clear_user(&store);
    assert_eq!(get_user(&store), None);
}

#[test]
fn saving_none_removes_user() {
    let store = MemoryStorage::new();
    save_user(&store, Some(&ada()));
    save_user(&store, None);
    assert_eq!(store.get(USER_KEY), None);
}

#[test]
fn corrupt_user_reads_as_none() {
    let store = MemoryStorage::new();
    store.set(USER_KEY, "undefined");
    assert_eq!(get_user(&store), None);
}

#[test]
fn token_round_trip() {
    let store = MemoryStorage::new();
    assert_eq!(get_auth_token(&store), None);
    save_auth_token(&store, "abc.def.ghi");
    assert_eq!(get_auth_token(&store), Some("abc.def.ghi".to_owned()));
}

#[test]
fn empty_token_counts_as_absent() {
    let store = MemoryStorage::new();
    save_auth_token(&store, "");
    assert_eq!(get_auth_token(&store), None);
}

#[test]
fn refresh_token_round_trip() {
    let store = MemoryStorage::new();
    assert_eq!(get_refresh_token(&store), None);
    save_refresh_token(&store, "r.e.f");
    assert_eq!(get_refresh_token(&store), Some("r.e.f".to_owned()));
    clear_refresh_token(&store);
    assert_eq!(get_refresh_token(&store), None);
    save_refresh_token(&store, "");
    assert_eq!(get_refresh_token(&store), None);
}

#[test]
fn clear_auth_token_signs_out_completely() {
    let store = MemoryStorage::new();
    save_auth_token(&store, "t");
    save_refresh_token(&store, "r");
    save_user(&store, Some(&ada()));
    clear_auth_token(&store);
    assert_eq!(get_auth_token(&store), None);
    assert_eq!(get_refresh_token(&store), None);
    assert_eq!(get_user(&store), None);
}
