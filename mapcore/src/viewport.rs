//! Web Mercator viewport: projection, zoom, pan, and fit-to-bounds.
//!
//! Screen coordinates are CSS pixels with the origin at the top-left of the
//! map element. World coordinates are Web Mercator pixels at the current
//! zoom; they never leave this module.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::f64::consts::PI;

use crate::consts::{MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::geometry::{Bounds, Position};

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Candidate graticule spacings in degrees, coarse to fine.
const GRATICULE_STEPS: [f64; 10] = [30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.01];

/// Minimum on-screen distance between graticule lines.
const GRATICULE_MIN_SPACING_PX: f64 = 80.0;

/// Camera over the Web Mercator plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Position,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { center: Position::new(0.0, 20.0), zoom: 2.0, width: 960.0, height: 600.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    fn project(&self, pos: Position) -> Point {
        let size = self.world_size();
        let lat = pos.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (pos.lon() + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + lat.sin()) / (1.0 - lat.sin())).ln() / (4.0 * PI)) * size;
        Point { x, y }
    }

    fn unproject(&self, world: Point) -> Position {
        let size = self.world_size();
        let lon = world.x / size * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * world.y / size)).sinh().atan().to_degrees();
        Position::new(wrap_lon(lon), lat.clamp(-MAX_LATITUDE, MAX_LATITUDE))
    }

    /// Convert a longitude/latitude to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, pos: Position) -> Point {
        let world = self.project(pos);
        let origin = self.project(self.center);
        Point {
            x: world.x - origin.x + self.width * 0.5,
            y: world.y - origin.y + self.height * 0.5,
        }
    }

    /// Convert a screen point to longitude/latitude.
    #[must_use]
    pub fn to_lonlat(&self, screen: Point) -> Position {
        let origin = self.project(self.center);
        self.unproject(Point {
            x: screen.x - self.width * 0.5 + origin.x,
            y: screen.y - self.height * 0.5 + origin.y,
        })
    }

    /// Change zoom by `delta` levels, keeping the center fixed.
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Move the map so content shifts by (`dx`, `dy`) screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.center = self.to_lonlat(Point { x: self.width * 0.5 - dx, y: self.height * 0.5 - dy });
    }

    /// Center on `bounds` at the largest zoom that keeps it inside the view
    /// with `padding` pixels to spare on every side.
    pub fn fit_bounds(&mut self, bounds: Bounds, padding: f64) {
        let base = Self { zoom: 0.0, ..*self };
        let nw = base.project(Position::new(bounds.west, bounds.north));
        let se = base.project(Position::new(bounds.east, bounds.south));
        let span_x = (se.x - nw.x).abs();
        let span_y = (se.y - nw.y).abs();
        let avail_x = (self.width - padding * 2.0).max(1.0);
        let avail_y = (self.height - padding * 2.0).max(1.0);

        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (avail_x / span_x).min(avail_y / span_y),
            (true, false) => avail_x / span_x,
            (false, true) => avail_y / span_y,
            (false, false) => MAX_ZOOM.exp2(),
        };
        self.zoom = scale.log2().clamp(MIN_ZOOM, MAX_ZOOM);
        self.center = base.unproject(Point { x: (nw.x + se.x) * 0.5, y: (nw.y + se.y) * 0.5 });
    }

    /// Longitude/latitude box currently on screen.
    #[must_use]
    pub fn visible_bounds(&self) -> Bounds {
        let nw = self.to_lonlat(Point::new(0.0, 0.0));
        let se = self.to_lonlat(Point::new(self.width, self.height));
        Bounds { west: self.lon_at(0.0), south: se.lat(), east: self.lon_at(self.width), north: nw.lat() }
    }

    /// Longitude under screen column `x`, clamped rather than wrapped.
    fn lon_at(&self, x: f64) -> f64 {
        let origin = self.project(self.center);
        let world_x = x - self.width * 0.5 + origin.x;
        (world_x / self.world_size() * 360.0 - 180.0).clamp(-180.0, 180.0)
    }

    /// Finest graticule spacing whose lines stay at least 80px apart,
    /// falling back to the coarsest step.
    #[must_use]
    pub fn graticule_step(&self) -> f64 {
        let px_per_degree = self.world_size() / 360.0;
        GRATICULE_STEPS
            .iter()
            .rev()
            .copied()
            .find(|step| step * px_per_degree >= GRATICULE_MIN_SPACING_PX)
            .unwrap_or(GRATICULE_STEPS[0])
    }

    /// Screen-space segments for meridians and parallels in view.
    #[must_use]
    pub fn graticule_lines(&self) -> Vec<(Point, Point)> {
        let step = self.graticule_step();
        let view = self.visible_bounds();
        let mut lines = Vec::new();

        let mut lon = (view.west / step).floor() * step;
        while lon <= view.east {
            let top = self.to_screen(Position::new(lon, view.north));
            let bottom = self.to_screen(Position::new(lon, view.south));
            lines.push((Point::new(top.x, 0.0), Point::new(bottom.x, self.height)));
            lon += step;
        }

        let mut lat = (view.south / step).floor() * step;
        while lat <= view.north {
            let y = self.to_screen(Position::new(self.center.lon(), lat)).y;
            lines.push((Point::new(0.0, y), Point::new(self.width, y)));
            lat += step;
        }
        lines
    }
}

fn wrap_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}
