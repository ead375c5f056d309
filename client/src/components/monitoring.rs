//! Free-trial call to action.

use leptos::prelude::*;

#[component]
pub fn Monitoring() -> impl IntoView {
    view! {
        <section id="plans" class="monitoring">
            <h2>"Start Monitoring Today"</h2>
            <p class="monitoring__lead">"Enjoy a 7-day free trial, then upgrade to unlock premium features."</p>
            <a class="btn btn--secondary" href="/login">
                "View Plans"
            </a>
        </section>
    }
}
