//! Map geometry engine for the AOI dashboard.
//!
//! This crate has no browser dependencies. It owns the GeoJSON geometry
//! types exchanged with the AOI backend, the Web Mercator viewport used to
//! place them on screen, and the draw/edit gesture state machine behind the
//! map view. The `client` crate renders what this crate computes and turns
//! DOM events into calls on [`draw::DrawSession`] and [`viewport::Viewport`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Polygon / MultiPolygon types, validation, bounds, area, vertex edits |
//! | [`viewport`] | Web Mercator projection, zoom, pan, fit-to-bounds |
//! | [`draw`] | Draw and vertex-edit gesture state machine |
//! | [`consts`] | Shared numeric constants (zoom limits, tile size, etc.) |

pub mod consts;
pub mod draw;
pub mod geometry;
pub mod viewport;
