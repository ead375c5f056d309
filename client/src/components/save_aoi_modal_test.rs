use super::*;
use mapcore::geometry::Position;

fn square(offset: f64) -> Geometry {
    Geometry::polygon_from_vertices(&[
        Position::new(offset, offset),
        Position::new(offset + 1.0, offset),
        Position::new(offset + 1.0, offset + 1.0),
    ])
    .unwrap()
}

fn stored() -> Aoi {
    Aoi {
        id: Some(11),
        name: "Ikoyi plots".to_owned(),
        description: Some("waterfront".to_owned()),
        geometry: square(0.0),
        is_active: false,
        monitoring_enabled: true,
        created_at: Some("2025-03-01T00:00:00Z".to_owned()),
    }
}

// =============================================================
// Seeding
// =============================================================

#[test]
fn editing_seeds_every_field() {
    let form = AoiForm::seeded(Some(&stored()));
    assert_eq!(form.name, "Ikoyi plots");
    assert_eq!(form.description, "waterfront");
    assert!(!form.is_active);
    assert!(form.monitoring_enabled);
}

#[test]
fn editing_without_description_seeds_empty_text() {
    let aoi = Aoi { description: None, ..stored() };
    assert_eq!(AoiForm::seeded(Some(&aoi)).description, "");
}

#[test]
fn creating_resets_to_defaults() {
    let form = AoiForm::seeded(None);
    assert_eq!(form.name, "");
    assert_eq!(form.description, "");
    assert!(form.is_active);
    assert!(!form.monitoring_enabled);
}

// =============================================================
// Build
// =============================================================

#[test]
fn build_without_any_geometry_is_rejected() {
    let form = AoiForm::seeded(None);
    assert_eq!(form.build(None, None), Err(NO_GEOMETRY_NOTICE));
}

#[test]
fn build_for_create_uses_drawn_geometry() {
    let mut form = AoiForm::seeded(None);
    form.name = "New site".to_owned();
    let aoi = form.build(None, Some(&square(5.0))).unwrap();
    assert_eq!(aoi.id, None);
    assert_eq!(aoi.name, "New site");
    assert_eq!(aoi.description.as_deref(), Some(""));
    assert_eq!(aoi.geometry, square(5.0));
    assert!(aoi.is_active);
    assert!(!aoi.monitoring_enabled);
}

#[test]
fn build_for_edit_keeps_identity_and_stored_geometry() {
    let mut form = AoiForm::seeded(Some(&stored()));
    form.is_active = true;
    let aoi = form.build(Some(&stored()), None).unwrap();
    assert_eq!(aoi.id, Some(11));
    assert_eq!(aoi.created_at.as_deref(), Some("2025-03-01T00:00:00Z"));
    assert_eq!(aoi.geometry, square(0.0));
    assert!(aoi.is_active);
}

#[test]
fn drawn_geometry_wins_over_stored() {
    let form = AoiForm::seeded(Some(&stored()));
    let aoi = form.build(Some(&stored()), Some(&square(9.0))).unwrap();
    assert_eq!(aoi.geometry, square(9.0));
}

#[test]
fn title_reflects_mode() {
    assert_eq!(modal_title(true), "Edit AOI");
    assert_eq!(modal_title(false), "Save AOI");
}

// =============================================================
// Area
// =============================================================

#[test]
fn area_label_follows_the_geometry_being_saved() {
    let drawn = square(40.0);
    let expected_drawn = mapcore::geometry::format_area(drawn.area_m2());
    assert_eq!(area_label(Some(&stored()), Some(&drawn)), Some(expected_drawn));
    assert_eq!(area_label(Some(&stored()), None), Some(stored().area_label()));
    assert_eq!(area_label(None, None), None);
}
