//! Toast stack for success and error notices.
//!
//! Each toast dismisses itself after `TOAST_TTL_MS` or on click.

use leptos::prelude::*;

use crate::state::ui::{Toast, UiState};

#[component]
pub fn Toasts() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            <For
                each=move || ui.get().toasts
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(crate::state::ui::TOAST_TTL_MS).await;
        ui.try_update(|u| u.dismiss_toast(id));
    });

    view! {
        <div class=format!("toast {}", toast.kind.css_modifier()) on:click=move |_| ui.update(|u| u.dismiss_toast(id))>
            {toast.message}
        </div>
    }
}
