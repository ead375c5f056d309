//! Signed-in user of this browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and the navbar to coordinate login redirects and
//! identity-dependent rendering. `loading` stays true until the cached
//! session has been read in the browser.

use crate::net::types::User;

/// Current user, plus whether the cached session has been read yet.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }
}
