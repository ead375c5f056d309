//! Application shell and root component.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is rendered by the server for every route; `App` provides the
//! shared state signals, restores the cached session once hydrated, and
//! declares the routes.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::components::toasts::Toasts;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::state::aois::AoisState;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::restore_session;
use crate::util::session;
use crate::util::storage::BrowserStorage;

/// HTML document wrapping the app during server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

/// Root component: context providers, session restore, and routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let aois = RwSignal::new(AoisState::default());
    let ui = RwSignal::new(UiState::default());
    provide_context(auth);
    provide_context(aois);
    provide_context(ui);

    // Effects only run in the browser, after hydration.
    Effect::new(move || {
        let store = BrowserStorage;
        let user = restore_session(&store);
        if user.is_none() && session::get_auth_token(&store).is_some() {
            log::info!("cached session is no longer valid; clearing it");
            session::clear_auth_token(&store);
        }
        auth.set(AuthState { user, loading: false });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/aoi-dashboard.css" />
        <Title text="Asset Watch" />
        <Router>
            <Navbar />
            <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/dashboard") view=DashboardPage />
            </Routes>
            <Footer />
            <Toasts />
        </Router>
    }
}
