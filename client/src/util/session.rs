//! Cached sign-in session: the user record and the API token.
//!
//! The user is stored as one JSON blob under `user`; the token as a raw
//! string under `auth_token`, and a JWT refresh token, when the backend
//! issued one, under `refresh_token`. Nothing here validates what it reads back:
//! an unreadable user record is logged and treated as signed out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::storage::{KeyValueStore, load_json, save_json};
use crate::net::types::User;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "auth_token";
pub const REFRESH_KEY: &str = "refresh_token";

/// Cache `user`, or clear the cached user when `None`.
pub fn save_user(store: &impl KeyValueStore, user: Option<&User>) {
    match user {
        Some(user) => save_json(store, USER_KEY, user),
        None => store.remove(USER_KEY),
    }
}

/// Cached user, or `None` when absent or unreadable.
pub fn get_user(store: &impl KeyValueStore) -> Option<User> {
    load_json(store, USER_KEY)
}

pub fn clear_user(store: &impl KeyValueStore) {
    store.remove(USER_KEY);
}

pub fn save_auth_token(store: &impl KeyValueStore, token: &str) {
    store.set(TOKEN_KEY, token);
}

/// Cached token; an empty string counts as absent.
pub fn get_auth_token(store: &impl KeyValueStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn save_refresh_token(store: &impl KeyValueStore, token: &str) {
    store.set(REFRESH_KEY, token);
}

/// Cached refresh token; an empty string counts as absent.
pub fn get_refresh_token(store: &impl KeyValueStore) -> Option<String> {
    store.get(REFRESH_KEY).filter(|t| !t.is_empty())
}

pub fn clear_refresh_token(store: &impl KeyValueStore) {
    store.remove(REFRESH_KEY);
}

/// Sign out locally: drop both tokens and the cached user.
pub fn clear_auth_token(store: &impl KeyValueStore) {
    store.remove(TOKEN_KEY);
    store.remove(REFRESH_KEY);
    store.remove(USER_KEY);
}
