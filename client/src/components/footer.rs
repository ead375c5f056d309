//! Site footer with the copyright line.

#[cfg(test)]
#[path = "footer_test.rs"]
mod footer_test;

use leptos::prelude::*;

use crate::util::jwt::now_ms;

const MS_PER_DAY: i64 = 86_400_000;

/// Gregorian year containing `ms` milliseconds after the Unix epoch.
#[must_use]
pub fn year_from_unix_ms(ms: i64) -> i64 {
    // Civil-from-days over 400-year eras, March-based years.
    let days = ms.div_euclid(MS_PER_DAY) + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let year = yoe + era * 400;
    if mp >= 10 { year + 1 } else { year }
}

#[must_use]
pub fn copyright_line(year: i64) -> String {
    format!("© {year} Proforce Galaxies Limited. All rights reserved.")
}

#[component]
pub fn Footer() -> impl IntoView {
    #[allow(clippy::cast_possible_truncation)]
    let year = year_from_unix_ms(now_ms() as i64);
    view! {
        <footer class="site-footer">
            <p>{copyright_line(year)}</p>
        </footer>
    }
}
