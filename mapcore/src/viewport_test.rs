#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- projection ---

#[test]
fn center_projects_to_screen_middle() {
    let viewport = Viewport { center: Position::new(13.4, 52.5), zoom: 10.0, width: 800.0, height: 400.0 };
    let p = viewport.to_screen(Position::new(13.4, 52.5));
    assert!(approx_eq(p.x, 400.0));
    assert!(approx_eq(p.y, 200.0));
}

#[test]
fn screen_to_lonlat_inverts_projection() {
    let viewport = Viewport { center: Position::new(-73.98, 40.75), zoom: 12.5, width: 960.0, height: 600.0 };
    let pos = Position::new(-73.95, 40.78);
    let back = viewport.to_lonlat(viewport.to_screen(pos));
    assert!(approx_eq(back.lon(), pos.lon()));
    assert!(approx_eq(back.lat(), pos.lat()));
}

#[test]
fn north_is_up_and_east_is_right() {
    let viewport = Viewport::default();
    let center = viewport.to_screen(viewport.center);
    let north_east = viewport.to_screen(Position::new(viewport.center.lon() + 1.0, viewport.center.lat() + 1.0));
    assert!(north_east.x > center.x);
    assert!(north_east.y < center.y);
}

#[test]
fn lonlat_is_clamped_at_poles() {
    let viewport = Viewport { center: Position::new(0.0, 0.0), zoom: 1.0, width: 960.0, height: 5000.0 };
    let top = viewport.to_lonlat(Point::new(480.0, 0.0));
    assert!(top.lat() <= MAX_LATITUDE);
}

// --- zoom / pan ---

#[test]
fn zoom_is_clamped() {
    let mut viewport = Viewport::default();
    viewport.zoom_by(100.0);
    assert_eq!(viewport.zoom, MAX_ZOOM);
    viewport.zoom_by(-100.0);
    assert_eq!(viewport.zoom, MIN_ZOOM);
}

#[test]
fn pan_moves_content_with_pointer() {
    let mut viewport = Viewport { center: Position::new(10.0, 10.0), zoom: 6.0, width: 960.0, height: 600.0 };
    let target = Position::new(10.5, 10.2);
    let before = viewport.to_screen(target);
    viewport.pan_by(40.0, -25.0);
    let after = viewport.to_screen(target);
    assert!((after.x - before.x - 40.0).abs() < 1e-3);
    assert!((after.y - before.y + 25.0).abs() < 1e-3);
}

// --- fit_bounds ---

#[test]
fn fit_bounds_keeps_corners_on_screen() {
    let mut viewport = Viewport::new(960.0, 600.0);
    let bounds = Bounds { west: 2.2, south: 48.8, east: 2.5, north: 48.95 };
    viewport.fit_bounds(bounds, 24.0);

    let nw = viewport.to_screen(Position::new(bounds.west, bounds.north));
    let se = viewport.to_screen(Position::new(bounds.east, bounds.south));
    assert!(nw.x >= 24.0 - EPSILON && nw.y >= 24.0 - EPSILON);
    assert!(se.x <= 936.0 + EPSILON && se.y <= 576.0 + EPSILON);
    // One axis should be tight against the padding.
    assert!(approx_eq(nw.x, 24.0) || approx_eq(nw.y, 24.0));
}

#[test]
fn fit_bounds_of_single_point_uses_max_zoom() {
    let mut viewport = Viewport::default();
    let pos = Position::new(30.0, -10.0);
    viewport.fit_bounds(Bounds { west: pos.0, south: pos.1, east: pos.0, north: pos.1 }, 24.0);
    assert_eq!(viewport.zoom, MAX_ZOOM);
    assert!(approx_eq(viewport.center.lon(), 30.0));
    assert!(approx_eq(viewport.center.lat(), -10.0));
}

// --- graticule ---

#[test]
fn graticule_step_gets_finer_with_zoom() {
    let mut viewport = Viewport::default();
    let coarse = viewport.graticule_step();
    viewport.zoom_by(6.0);
    assert!(viewport.graticule_step() < coarse);
}

#[test]
fn graticule_lines_span_the_view() {
    let viewport = Viewport::default();
    let lines = viewport.graticule_lines();
    assert!(!lines.is_empty());
    assert!(lines.iter().any(|(a, b)| a.x == b.x));
    assert!(lines.iter().any(|(a, b)| a.y == b.y));
}
