//! Local UI chrome state (list panel, toasts).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`aois`, `auth`)
//! so rendering controls can evolve independently of backend data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Upper bound on simultaneously visible toasts; older ones are dropped.
pub const MAX_TOASTS: usize = 4;

/// How long a toast stays on screen before it dismisses itself.
pub const TOAST_TTL_MS: u32 = 4000;

/// Visual tone of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

/// A short user-visible notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// UI state for panels and notices.
#[derive(Clone, Debug)]
pub struct UiState {
    pub list_panel_open: bool,
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self { list_panel_open: true, toasts: Vec::new(), next_toast_id: 1 }
    }
}

impl UiState {
    /// Queue a toast and return its id.
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push_toast(ToastKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push_toast(ToastKind::Error, message)
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toggle_list_panel(&mut self) {
        self.list_panel_open = !self.list_panel_open;
    }
}
