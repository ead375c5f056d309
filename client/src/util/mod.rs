//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, token
//! inspection, session checks) from page and component logic to improve
//! reuse and testability.

pub mod auth;
pub mod jwt;
pub mod session;
pub mod storage;
