//! Floating badge that counts up to the number of listed AOIs.
//!
//! The displayed number climbs by one every [`TICK_MS`] until it reaches the
//! total, and snaps down immediately when the total shrinks.

#[cfg(test)]
#[path = "properties_card_test.rs"]
mod properties_card_test;

use leptos::prelude::*;

/// Count-up step interval.
pub const TICK_MS: u32 = 100;

/// Next displayed value on the way to `total`.
#[must_use]
pub fn next_count(current: usize, total: usize) -> usize {
    if current < total { current + 1 } else { total }
}

/// Value displayed before the first tick.
#[must_use]
pub fn initial_count(total: usize) -> usize {
    total.min(1)
}

#[component]
pub fn PropertiesCard(#[prop(into)] total: Signal<usize>) -> impl IntoView {
    let count = RwSignal::new(initial_count(total.get_untracked()));

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(TICK_MS).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                let next = next_count(count.get_untracked(), total.get_untracked());
                if next != count.get_untracked() {
                    count.set(next);
                }
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    view! {
        <div class="properties-card">
            <p class="properties-card__count">{move || count.get()}</p>
            <p class="properties-card__label">"Properties Available"</p>
        </div>
    }
}
