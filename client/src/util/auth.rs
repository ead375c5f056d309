//! Session checks and the unauthenticated redirect shared by guarded routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend is the authority on access. These checks only decide whether
//! the UI should treat the cached session as usable or send the user to
//! `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use super::jwt;
use super::session;
use super::storage::KeyValueStore;
use crate::net::types::User;
use crate::state::auth::AuthState;

/// A cached session is usable when both a token and a user are present and
/// the token, if it is a JWT, has not expired. Opaque tokens are trusted
/// until the backend rejects them.
pub fn session_is_valid(token: Option<&str>, user: Option<&User>, now_ms: f64) -> bool {
    let (Some(token), Some(_)) = (token, user) else {
        return false;
    };
    !jwt::looks_like_jwt(token) || !jwt::is_token_expired_at(token, now_ms)
}

/// User of the cached session, if the session is usable right now. An
/// expired access token still counts while a refresh token is cached, since
/// the first `401` will trade it for a new one.
pub fn restore_session(store: &impl KeyValueStore) -> Option<User> {
    let token = session::get_auth_token(store);
    let user = session::get_user(store);
    let refreshable = token.is_some() && session::get_refresh_token(store).is_some();
    if refreshable || session_is_valid(token.as_deref(), user.as_ref(), jwt::now_ms()) {
        user
    } else {
        None
    }
}

/// Whether a guarded page should leave for `/login`.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Drop the cached session and mark the user signed out.
pub fn sign_out(store: &impl KeyValueStore, auth: RwSignal<AuthState>) {
    session::clear_auth_token(store);
    auth.update(|a| {
        a.user = None;
        a.loading = false;
    });
}
