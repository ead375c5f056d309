//! Landing-page hero banner.

use leptos::prelude::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section class="hero">
            <div class="hero__text">
                <h1>"Monitor Your Assets from Space"</h1>
                <p class="hero__lead">
                    "Harness cutting-edge satellite data and geospatial technology to monitor, analyze, and protect your assets in real time."
                </p>
                <a class="btn btn--light" href="/login">
                    "Start Free Trial"
                </a>
            </div>
            <div class="hero__globe" aria-hidden="true"></div>
        </section>
    }
}
