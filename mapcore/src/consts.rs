//! Shared numeric constants for the map engine.

// ── Projection ──────────────────────────────────────────────────

/// Edge length in pixels of one Web Mercator tile at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude bound of the Web Mercator square.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Smallest zoom level the viewport allows.
pub const MIN_ZOOM: f64 = 1.0;

/// Largest zoom level the viewport allows.
pub const MAX_ZOOM: f64 = 18.0;

/// Zoom change applied by a single zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.0;

// ── Geometry ────────────────────────────────────────────────────

/// Minimum distinct vertices for a drawable polygon ring.
pub const MIN_RING_VERTICES: usize = 3;

/// Minimum positions in a closed GeoJSON linear ring (first == last).
pub const MIN_CLOSED_RING_POSITIONS: usize = 4;

/// WGS84 equatorial radius, used as the sphere radius for area.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Coordinates closer than this (in degrees) count as the same vertex.
pub const VERTEX_EPSILON_DEG: f64 = 1e-9;

// ── Interaction ─────────────────────────────────────────────────

/// Screen padding kept around geometry when fitting the viewport.
pub const FIT_PADDING_PX: f64 = 24.0;

/// Radius of vertex handles drawn while editing a shape.
pub const HANDLE_RADIUS_PX: f64 = 6.0;
