//! Top navigation bar with brand, section links, and session actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::sign_out;
use crate::util::storage::BrowserStorage;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let display_name = move || auth.get().user.map(|u| u.display_name()).unwrap_or_default();
    let on_logout = move |_: leptos::ev::MouseEvent| {
        sign_out(&BrowserStorage, auth);
        navigate("/", NavigateOptions::default());
    };

    view! {
        <header class="navbar">
            <a class="navbar__brand" href="/">
                "ASSET WATCH"
            </a>
            <nav class="navbar__links">
                <a href="/#features">"Features"</a>
                <a href="/#plans">"Plans"</a>
            </nav>
            <div class="navbar__actions">
                <Show
                    when=move || auth.get().signed_in()
                    fallback=|| {
                        view! {
                            <a class="btn btn--outline" href="/login">
                                "Login"
                            </a>
                        }
                    }
                >
                    <a class="btn" href="/dashboard">
                        "Dashboard"
                    </a>
                    <span class="navbar__user">{display_name}</span>
                    <button class="btn btn--outline" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </header>
    }
}
