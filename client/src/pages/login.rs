//! Username + password login page.
//!
//! On success the token and user record are cached in browser storage and
//! the browser moves on to `/dashboard`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::LoginRequest;
#[cfg(any(test, feature = "hydrate"))]
use crate::net::types::{LoginResponse, User};
use crate::state::auth::AuthState;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::jwt;

const MISSING_FIELDS: &str = "Enter both username and password.";

/// Trim the username and require both fields.
fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// User record to cache for a successful login: the one the backend sent,
/// else the identity claims of a JWT, else just the entered username.
#[cfg(any(test, feature = "hydrate"))]
fn session_user(response: &LoginResponse, token: &str, username: &str) -> User {
    if let Some(user) = &response.user {
        return user.clone();
    }
    if jwt::looks_like_jwt(token)
        && let Some(claims) = jwt::decode_jwt(token)
    {
        return User {
            id: claims.user_id(),
            email: claims.email,
            username: claims.username.or_else(|| Some(username.to_owned())),
            ..User::default()
        };
    }
    User { username: Some(username.to_owned()), ..User::default() }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: skip the form.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.signed_in() {
            navigate_home("/dashboard", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&request).await {
                    Ok(response) => {
                        let token = response.session_token().unwrap_or_default().to_owned();
                        let user = session_user(&response, &token, &request.username);
                        let store = crate::util::storage::BrowserStorage;
                        crate::util::session::save_auth_token(&store, &token);
                        match response.refresh.as_deref() {
                            Some(refresh) => crate::util::session::save_refresh_token(&store, refresh),
                            None => crate::util::session::clear_refresh_token(&store),
                        }
                        crate::util::session::save_user(&store, Some(&user));
                        log::info!("signed in as {}", user.display_name());
                        auth.set(AuthState { user: Some(user), loading: false });
                        info.set(String::new());
                        navigate("/dashboard", NavigateOptions::default());
                    }
                    Err(e) => {
                        log::warn!("login failed: {e}");
                        info.set(e.login_message());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"ASSET WATCH"</h1>
                <p class="login-card__subtitle">"Sign in to manage your areas of interest"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
