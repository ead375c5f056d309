//! Route-level screens: landing, login, and the AOI dashboard.
//!
//! ARCHITECTURE
//! ============
//! A page wires signals, fetches, and guards for its route; markup for the
//! pieces it shows lives in `components`.

pub mod dashboard;
pub mod home;
pub mod login;
