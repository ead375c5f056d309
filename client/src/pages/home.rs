//! Public landing page.

use leptos::prelude::*;

use crate::components::features::Features;
use crate::components::hero::Hero;
use crate::components::monitoring::Monitoring;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="home-page">
            <Hero />
            <section id="features">
                <Features />
            </section>
            <Monitoring />
        </main>
    }
}
