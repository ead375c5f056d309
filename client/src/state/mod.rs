//! Shared client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each struct is wrapped in an `RwSignal` by `app::App` and read with
//! `expect_context` by pages and components.

pub mod aois;
pub mod auth;
pub mod ui;
