//! Draw and vertex-edit gesture state machine for the map view.
//!
//! The session is the only mutable interaction state of the map. The host
//! component feeds it longitude/latitude positions (already converted from
//! screen space by the viewport) and reads back what to render and what to
//! emit when a gesture completes.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::geometry::{Geometry, GeometryError, Position, VertexRef};

/// Current map gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DrawSession {
    /// No gesture; clicks select shapes.
    #[default]
    Idle,
    /// Placing vertices of a new polygon.
    Drawing { vertices: Vec<Position> },
    /// Moving vertices of an existing shape identified by `target`.
    Editing { target: i64, geometry: Geometry, dragging: Option<VertexRef> },
}

impl DrawSession {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Target id while editing.
    #[must_use]
    pub fn editing_target(&self) -> Option<i64> {
        match self {
            Self::Editing { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Start placing vertices of a new polygon, discarding any other gesture.
    pub fn begin_drawing(&mut self) {
        *self = Self::Drawing { vertices: Vec::new() };
    }

    /// Append a vertex while drawing. Returns false in any other state.
    pub fn add_vertex(&mut self, pos: Position) -> bool {
        match self {
            Self::Drawing { vertices } => {
                vertices.push(pos);
                true
            }
            _ => false,
        }
    }

    /// Remove the most recently placed vertex while drawing.
    pub fn undo_vertex(&mut self) -> Option<Position> {
        match self {
            Self::Drawing { vertices } => vertices.pop(),
            _ => None,
        }
    }

    /// Vertices placed so far (empty unless drawing).
    #[must_use]
    pub fn pending_vertices(&self) -> &[Position] {
        match self {
            Self::Drawing { vertices } => vertices,
            _ => &[],
        }
    }

    /// Close the drawn ring into a polygon and return to idle.
    ///
    /// The session stays in drawing mode when the shape is not yet valid, so
    /// the user can keep adding vertices.
    ///
    /// # Errors
    ///
    /// Returns the [`GeometryError`] from building the polygon, or
    /// [`GeometryError::Empty`] when no drawing is in progress.
    pub fn finish(&mut self) -> Result<Geometry, GeometryError> {
        let Self::Drawing { vertices } = self else {
            return Err(GeometryError::Empty);
        };
        let geometry = Geometry::polygon_from_vertices(vertices)?;
        *self = Self::Idle;
        Ok(geometry)
    }

    /// Start editing the vertices of `geometry` belonging to `target`.
    pub fn begin_editing(&mut self, target: i64, geometry: Geometry) {
        *self = Self::Editing { target, geometry, dragging: None };
    }

    /// Pick up a vertex for dragging. Returns false if the reference is not
    /// a vertex of the edited shape or no edit is in progress.
    pub fn grab_vertex(&mut self, at: VertexRef) -> bool {
        match self {
            Self::Editing { geometry, dragging, .. } if geometry.vertex(at).is_some() => {
                *dragging = Some(at);
                true
            }
            _ => false,
        }
    }

    /// Move the grabbed vertex to `pos`. Invalid positions are ignored and
    /// the previous geometry is kept.
    pub fn drag_to(&mut self, pos: Position) -> bool {
        let Self::Editing { geometry, dragging: Some(at), .. } = self else {
            return false;
        };
        match geometry.with_vertex_moved(*at, pos) {
            Ok(next) => {
                *geometry = next;
                true
            }
            Err(_) => false,
        }
    }

    /// Drop the grabbed vertex.
    pub fn release(&mut self) {
        if let Self::Editing { dragging, .. } = self {
            *dragging = None;
        }
    }

    /// Geometry being drawn or edited, for rendering.
    #[must_use]
    pub fn edited_geometry(&self) -> Option<&Geometry> {
        match self {
            Self::Editing { geometry, .. } => Some(geometry),
            _ => None,
        }
    }

    /// Finish editing and return the target with its new geometry.
    pub fn commit(&mut self) -> Option<(i64, Geometry)> {
        match std::mem::take(self) {
            Self::Editing { target, geometry, .. } => Some((target, geometry)),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Abandon any gesture.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}
