//! Landing-page feature cards and the animated stats strip.

#[cfg(test)]
#[path = "features_test.rs"]
mod features_test;

use leptos::prelude::*;

/// One feature card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 4] = [
    Feature {
        icon: "🛰",
        title: "Real-Time Asset Monitoring",
        description: "Track and visualize your assets from space with live satellite updates, ensuring full visibility at any time.",
    },
    Feature {
        icon: "📈",
        title: "Predictive Insights",
        description: "Leverage AI-driven analytics to anticipate changes and detect anomalies before they become issues.",
    },
    Feature {
        icon: "🛡",
        title: "Data Security",
        description: "Your asset data is safeguarded with enterprise-grade encryption and secure access protocols.",
    },
    Feature {
        icon: "☁",
        title: "Cloud Integration",
        description: "Seamlessly integrate with existing cloud platforms for unified data management and collaboration.",
    },
];

/// How a stat value is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatUnit {
    /// One decimal place, `%` suffix.
    Percent,
    /// Whole number, `+` suffix.
    AtLeast,
}

/// One stat tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub target: f64,
    pub unit: StatUnit,
}

pub const STATS: [Stat; 4] = [
    Stat { label: "Uptime Guarantee", target: 99.9, unit: StatUnit::Percent },
    Stat { label: "Global Clients", target: 250.0, unit: StatUnit::AtLeast },
    Stat { label: "Accuracy Rate", target: 95.0, unit: StatUnit::Percent },
    Stat { label: "Countries Covered", target: 50.0, unit: StatUnit::AtLeast },
];

/// Frames in the count-up animation.
pub const COUNT_UP_STEPS: u32 = 60;

/// Total count-up duration.
pub const COUNT_UP_MS: u32 = 2000;

/// Value shown at `step` of the count-up, reaching `target` on the last step.
#[must_use]
pub fn count_up_value(target: f64, step: u32) -> f64 {
    if step >= COUNT_UP_STEPS {
        return target;
    }
    (target * f64::from(step) / f64::from(COUNT_UP_STEPS)).min(target)
}

#[must_use]
pub fn format_stat(value: f64, unit: StatUnit) -> String {
    match unit {
        StatUnit::Percent => format!("{}%", (value * 10.0).round() / 10.0),
        StatUnit::AtLeast => format!("{:.0}+", value.round()),
    }
}

/// Feature grid followed by the "Why Choose Us?" stats.
#[component]
pub fn Features() -> impl IntoView {
    let step = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            let frame = COUNT_UP_MS / COUNT_UP_STEPS;
            while step.get_untracked() < COUNT_UP_STEPS {
                gloo_timers::future::TimeoutFuture::new(frame).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                step.update(|s| *s += 1);
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let cards = FEATURES
        .iter()
        .map(|feature| {
            view! {
                <article class="feature-card">
                    <div class="feature-card__icon" aria-hidden="true">{feature.icon}</div>
                    <h3 class="feature-card__title">{feature.title}</h3>
                    <p class="feature-card__description">{feature.description}</p>
                </article>
            }
        })
        .collect_view();

    let tiles = STATS
        .iter()
        .map(|stat| {
            let stat = *stat;
            view! {
                <div class="stat-tile">
                    <p class="stat-tile__value">
                        {move || format_stat(count_up_value(stat.target, step.get()), stat.unit)}
                    </p>
                    <p class="stat-tile__label">{stat.label}</p>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="features">
            <section class="features__cards">
                <h2>"Powerful Features to Monitor Your Assets"</h2>
                <p class="features__lead">
                    "Designed to give you real-time insights and control over your assets from space, with secure, predictive, and scalable technology."
                </p>
                <div class="features__grid">{cards}</div>
            </section>
            <section class="features__stats">
                <h2>"Why Choose Us?"</h2>
                <p class="features__lead">
                    "We combine cutting-edge satellite technology, AI-driven insights, and enterprise-grade security to give you the best asset monitoring platform available."
                </p>
                <div class="features__grid">{tiles}</div>
                <a class="btn btn--primary features__cta" href="/login">
                    "Get Started Today"
                </a>
            </section>
        </div>
    }
}
