use super::*;
use mapcore::geometry::{Geometry, Position};

fn aoi(id: i64, name: &str) -> Aoi {
    let geometry =
        Geometry::polygon_from_vertices(&[Position::new(0.0, 0.0), Position::new(1.0, 0.0), Position::new(1.0, 1.0)]).unwrap();
    Aoi {
        id: Some(id),
        name: name.to_owned(),
        description: None,
        geometry,
        is_active: true,
        monitoring_enabled: false,
        created_at: None,
    }
}

fn ids(state: &AoisState) -> Vec<Option<i64>> {
    state.items.iter().map(|a| a.id).collect()
}

// =============================================================
// replace_all
// =============================================================

#[test]
fn replace_all_clears_loading_and_error() {
    let mut state = AoisState { loading: true, error: Some("boom".to_owned()), ..AoisState::default() };
    state.replace_all(vec![aoi(1, "a"), aoi(2, "b")]);
    assert_eq!(ids(&state), vec![Some(1), Some(2)]);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[test]
fn replace_all_drops_stale_preview() {
    let mut state = AoisState::default();
    state.replace_all(vec![aoi(1, "a")]);
    state.focus(1);
    state.replace_all(vec![aoi(2, "b")]);
    assert_eq!(state.preview_id, None);
}

// =============================================================
// insert_created
// =============================================================

#[test]
fn created_record_appears_exactly_once() {
    let mut state = AoisState::default();
    state.replace_all(vec![aoi(1, "a")]);
    state.insert_created(aoi(2, "b"));
    state.insert_created(aoi(2, "b renamed"));
    assert_eq!(ids(&state), vec![Some(1), Some(2)]);
    assert_eq!(state.find(2).map(|a| a.name.as_str()), Some("b renamed"));
}

// =============================================================
// apply_updated
// =============================================================

#[test]
fn update_replaces_matching_entry() {
    let mut state = AoisState::default();
    state.replace_all(vec![aoi(1, "a"), aoi(2, "b")]);
    let mut changed = aoi(2, "b");
    changed.monitoring_enabled = true;
    assert!(state.apply_updated(changed));
    assert!(state.find(2).is_some_and(|a| a.monitoring_enabled));
    assert_eq!(ids(&state), vec![Some(1), Some(2)]);
}

#[test]
fn update_after_delete_does_not_resurrect() {
    let mut state = AoisState::default();
    state.replace_all(vec![aoi(1, "a")]);
    assert!(state.remove(1));
    assert!(!state.apply_updated(aoi(1, "late")));
    assert!(state.items.is_empty());
}

#[test]
fn update_without_id_is_ignored() {
    let mut state = AoisState::default();
    let mut orphan = aoi(1, "a");
    orphan.id = None;
    assert!(!state.apply_updated(orphan));
    assert!(state.items.is_empty());
}

// =============================================================
// remove
// =============================================================

#[test]
fn remove_drops_id_and_preview() {
    let mut state = AoisState::default();
    state.replace_all(vec![aoi(1, "a"), aoi(2, "b")]);
    state.focus(2);
    assert!(state.remove(2));
    assert_eq!(ids(&state), vec![Some(1)]);
    assert_eq!(state.preview_id, None);
    assert!(!state.remove(2));
}

// =============================================================
// in-flight guard
// =============================================================

#[test]
fn second_mutation_on_same_id_is_refused() {
    let mut state = AoisState::default();
    assert!(state.begin_mutation(7));
    assert!(state.is_pending(7));
    assert!(!state.begin_mutation(7));
    assert!(state.begin_mutation(8));
    state.end_mutation(7);
    assert!(!state.is_pending(7));
    assert!(state.begin_mutation(7));
}

#[test]
fn focus_ignores_unknown_ids() {
    let mut state = AoisState::default();
    state.replace_all(vec![aoi(3, "c"), aoi(4, "d")]);
    state.focus(3);
    assert_eq!(state.preview_id, Some(3));
    state.focus(4);
    assert_eq!(state.preview_id, Some(4));
    state.focus(99);
    assert_eq!(state.preview_id, Some(4));
}
