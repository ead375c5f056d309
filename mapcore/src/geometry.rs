//! GeoJSON geometry for areas of interest.
//!
//! Only the two shapes the backend stores are modelled: `Polygon` and
//! `MultiPolygon`. Positions are `[longitude, latitude]` pairs in WGS84
//! degrees, optionally followed by an altitude. Linear rings follow the GeoJSON convention of repeating the first
//! position at the end, so a triangle is four positions long.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::consts::{EARTH_RADIUS_M, MIN_CLOSED_RING_POSITIONS, MIN_RING_VERTICES, VERTEX_EPSILON_DEG};

/// Errors raised when building or editing a geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A drawn shape has fewer distinct vertices than a polygon needs.
    #[error("polygon needs at least 3 distinct vertices, found {found}")]
    TooFewVertices { found: usize },
    /// A stored ring has fewer than four positions.
    #[error("linear ring needs at least 4 positions, found {found}")]
    RingTooShort { found: usize },
    /// A stored ring does not end where it starts.
    #[error("linear ring is not closed")]
    OpenRing,
    /// A position lies outside longitude/latitude range or is not finite.
    #[error("coordinate out of range: [{lon}, {lat}]")]
    OutOfRange { lon: f64, lat: f64 },
    /// The geometry has no polygons or a polygon has no rings.
    #[error("geometry has no coordinates")]
    Empty,
    /// A vertex reference does not address an existing position.
    #[error("no vertex at polygon {}, ring {}, index {}", .0.polygon, .0.ring, .0.vertex)]
    NoSuchVertex(VertexRef),
}

/// A `[longitude, latitude]` or `[longitude, latitude, altitude]` position.
///
/// Longitude and latitude are WGS84 degrees. Altitude is carried through
/// untouched so a record read from the backend is written back unchanged;
/// nothing on the map reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub f64, pub f64, pub Option<f64>);

impl Position {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(lon, lat, None)
    }

    #[must_use]
    pub fn with_altitude(lon: f64, lat: f64, alt: f64) -> Self {
        Self(lon, lat, Some(alt))
    }

    #[must_use]
    pub fn lon(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn lat(self) -> f64 {
        self.1
    }

    #[must_use]
    pub fn alt(self) -> Option<f64> {
        self.2
    }

    /// Whether both components are finite and within WGS84 range.
    #[must_use]
    pub fn is_in_range(self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && (-180.0..=180.0).contains(&self.0)
            && (-90.0..=90.0).contains(&self.1)
    }

    fn same_as(self, other: Self) -> bool {
        (self.0 - other.0).abs() < VERTEX_EPSILON_DEG && (self.1 - other.1).abs() < VERTEX_EPSILON_DEG
    }

    fn check_range(self) -> Result<(), GeometryError> {
        if self.is_in_range() {
            Ok(())
        } else {
            Err(GeometryError::OutOfRange { lon: self.0, lat: self.1 })
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.2.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.0)?;
        seq.serialize_element(&self.1)?;
        if let Some(alt) = self.2 {
            seq.serialize_element(&alt)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(PositionVisitor)
    }
}

struct PositionVisitor;

impl<'de> Visitor<'de> for PositionVisitor {
    type Value = Position;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a position of 2 or 3 numbers")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Position, A::Error> {
        let lon: f64 = seq.next_element()?.ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
        let lat: f64 = seq.next_element()?.ok_or_else(|| <A::Error as de::Error>::invalid_length(1, &self))?;
        let alt = seq.next_element::<f64>()?;
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(<A::Error as de::Error>::invalid_length(4, &self));
        }
        Ok(Position(lon, lat, alt))
    }
}

/// A closed linear ring.
pub type Ring = Vec<Position>;

/// Address of one position inside a geometry.
///
/// For a `Polygon`, `polygon` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub polygon: usize,
    pub ring: usize,
    pub vertex: usize,
}

/// AOI geometry as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// Build a single-ring polygon from the vertices of a drawn shape.
    ///
    /// Consecutive duplicates and an explicit closing vertex are dropped
    /// before counting, then the ring is closed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than three distinct
    /// vertices and [`GeometryError::OutOfRange`] for invalid coordinates.
    pub fn polygon_from_vertices(vertices: &[Position]) -> Result<Self, GeometryError> {
        let mut ring: Ring = Vec::with_capacity(vertices.len() + 1);
        for &pos in vertices {
            pos.check_range()?;
            if ring.last().is_some_and(|&last| last.same_as(pos)) {
                continue;
            }
            ring.push(pos);
        }
        if ring.len() > 1 && ring[0].same_as(ring[ring.len() - 1]) {
            ring.pop();
        }
        if ring.len() < MIN_RING_VERTICES {
            return Err(GeometryError::TooFewVertices { found: ring.len() });
        }
        ring.push(ring[0]);
        Ok(Self::Polygon { coordinates: vec![ring] })
    }

    /// Every polygon of this geometry as a slice of rings.
    #[must_use]
    pub fn polygons(&self) -> Vec<&[Ring]> {
        match self {
            Self::Polygon { coordinates } => vec![coordinates.as_slice()],
            Self::MultiPolygon { coordinates } => coordinates.iter().map(Vec::as_slice).collect(),
        }
    }

    fn polygons_mut(&mut self) -> Vec<&mut Vec<Ring>> {
        match self {
            Self::Polygon { coordinates } => vec![coordinates],
            Self::MultiPolygon { coordinates } => coordinates.iter_mut().collect(),
        }
    }

    /// Check GeoJSON structural rules: non-empty, closed rings of at least
    /// four positions, coordinates in range.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation found.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let polygons = self.polygons();
        if polygons.is_empty() {
            return Err(GeometryError::Empty);
        }
        for rings in polygons {
            if rings.is_empty() {
                return Err(GeometryError::Empty);
            }
            for ring in rings {
                if ring.len() < MIN_CLOSED_RING_POSITIONS {
                    return Err(GeometryError::RingTooShort { found: ring.len() });
                }
                for &pos in ring {
                    pos.check_range()?;
                }
                if !ring[0].same_as(ring[ring.len() - 1]) {
                    return Err(GeometryError::OpenRing);
                }
            }
        }
        Ok(())
    }

    /// Bounding box over every position, or `None` when there are none.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_positions(self.polygons().into_iter().flatten().flatten().copied())
    }

    /// Position addressed by `at`, if it exists.
    #[must_use]
    pub fn vertex(&self, at: VertexRef) -> Option<Position> {
        self.polygons()
            .get(at.polygon)
            .and_then(|rings| rings.get(at.ring))
            .and_then(|ring| ring.get(at.vertex))
            .copied()
    }

    /// Editable vertices: every ring position except the closing duplicate.
    #[must_use]
    pub fn editable_vertices(&self) -> Vec<(VertexRef, Position)> {
        let mut out = Vec::new();
        for (p, rings) in self.polygons().into_iter().enumerate() {
            for (r, ring) in rings.iter().enumerate() {
                let open_len = open_length(ring);
                for (v, &pos) in ring.iter().take(open_len).enumerate() {
                    out.push((VertexRef { polygon: p, ring: r, vertex: v }, pos));
                }
            }
        }
        out
    }

    /// Copy of this geometry with one vertex moved. Moving the first vertex
    /// of a ring also moves its closing duplicate so the ring stays closed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NoSuchVertex`] for a bad reference and
    /// [`GeometryError::OutOfRange`] for an invalid target position.
    pub fn with_vertex_moved(&self, at: VertexRef, to: Position) -> Result<Self, GeometryError> {
        to.check_range()?;
        let mut next = self.clone();
        let ring = next
            .polygons_mut()
            .into_iter()
            .nth(at.polygon)
            .and_then(|rings| rings.get_mut(at.ring))
            .ok_or(GeometryError::NoSuchVertex(at))?;
        let open_len = open_length(ring);
        let closed = open_len < ring.len();
        let index = if closed && at.vertex == ring.len() - 1 { 0 } else { at.vertex };
        if index >= ring.len() {
            return Err(GeometryError::NoSuchVertex(at));
        }
        let to = Position(to.0, to.1, to.2.or(ring[index].2));
        ring[index] = to;
        if closed && index == 0 {
            let last = ring.len() - 1;
            ring[last] = to;
        }
        Ok(next)
    }

    /// Area in square metres on a spherical earth. Outer rings count
    /// positive and holes negative regardless of winding.
    #[must_use]
    pub fn area_m2(&self) -> f64 {
        self.polygons().into_iter().map(polygon_area_m2).sum()
    }

    /// Number of editable vertices across all rings.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.polygons()
            .into_iter()
            .flatten()
            .map(|ring| open_length(ring))
            .sum()
    }
}

fn polygon_area_m2(rings: &[Ring]) -> f64 {
    let mut rings = rings.iter();
    let Some(outer) = rings.next() else {
        return 0.0;
    };
    let holes: f64 = rings.map(|ring| ring_area_m2(ring)).sum();
    (ring_area_m2(outer) - holes).max(0.0)
}

/// Unsigned spherical area of one ring (Chamberlain and Duquette, 2007).
fn ring_area_m2(ring: &[Position]) -> f64 {
    let n = open_length(ring);
    if n < MIN_RING_VERTICES {
        return 0.0;
    }
    let twice_area: f64 = (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            (next.0 - prev.0).to_radians() * ring[i].1.to_radians().sin()
        })
        .sum();
    (twice_area * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Human-readable area: square metres, hectares above 1 ha, square
/// kilometres above 1 km².
#[must_use]
pub fn format_area(m2: f64) -> String {
    if m2 > 1_000_000.0 {
        format!("{:.2} km²", m2 / 1_000_000.0)
    } else if m2 > 10_000.0 {
        format!("{:.2} ha", m2 / 10_000.0)
    } else {
        format!("{m2:.2} m²")
    }
}

/// Length of a ring without its closing duplicate.
fn open_length(ring: &[Position]) -> usize {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first.same_as(*last) => ring.len() - 1,
        _ => ring.len(),
    }
}

/// Axis-aligned longitude/latitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    /// Smallest box containing every position, or `None` for an empty input.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self { west: first.0, south: first.1, east: first.0, north: first.1 };
        for pos in iter {
            bounds.extend(pos);
        }
        Some(bounds)
    }

    /// Grow the box to include `pos`.
    pub fn extend(&mut self, pos: Position) {
        self.west = self.west.min(pos.0);
        self.south = self.south.min(pos.1);
        self.east = self.east.max(pos.0);
        self.north = self.north.max(pos.1);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }

    #[must_use]
    pub fn center(self) -> Position {
        Position::new((self.west + self.east) * 0.5, (self.south + self.north) * 0.5)
    }
}
