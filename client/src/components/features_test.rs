use super::*;

#[test]
fn four_features_with_copy() {
    let titles: Vec<&str> = FEATURES.iter().map(|f| f.title).collect();
    assert_eq!(
        titles,
        vec!["Real-Time Asset Monitoring", "Predictive Insights", "Data Security", "Cloud Integration"]
    );
    assert!(FEATURES.iter().all(|f| !f.description.is_empty()));
}

#[test]
fn stats_render_final_values() {
    let finals: Vec<String> = STATS.iter().map(|s| format_stat(s.target, s.unit)).collect();
    assert_eq!(finals, vec!["99.9%", "250+", "95%", "50+"]);
}

#[test]
fn count_up_starts_at_zero_and_lands_on_target() {
    assert_eq!(count_up_value(250.0, 0), 0.0);
    assert_eq!(count_up_value(250.0, 30), 125.0);
    assert_eq!(count_up_value(250.0, COUNT_UP_STEPS), 250.0);
    assert_eq!(count_up_value(250.0, COUNT_UP_STEPS + 5), 250.0);
}

#[test]
fn format_stat_rounds_per_unit() {
    assert_eq!(format_stat(49.95, StatUnit::Percent), "50%");
    assert_eq!(format_stat(12.34, StatUnit::Percent), "12.3%");
    assert_eq!(format_stat(124.6, StatUnit::AtLeast), "125+");
}
