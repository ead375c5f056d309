//! Leptos UI crate for the AOI dashboard.
//!
//! ARCHITECTURE
//! ============
//! Built twice: with `ssr` into the server binary for HTML rendering, and
//! with `hydrate` into WASM that attaches to that HTML in the browser.
//!
//! | Module | Role |
//! |--------|------|
//! | `app` | Shell, context providers, routes |
//! | `pages` | Route-level screens (home, login, dashboard) |
//! | `components` | Map, list panel, modal, landing sections |
//! | `state` | Context state structs |
//! | `net` | REST client and wire types |
//! | `util` | Storage, session cache, JWT decoding, auth guard |

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    leptos::mount::hydrate_body(app::App);
}
