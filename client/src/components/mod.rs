//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the map, AOI list, modal, and landing sections while
//! reading shared state from Leptos context providers. Mutations are emitted
//! as callbacks to the owning page.

pub mod aoi_list_panel;
pub mod features;
pub mod footer;
pub mod hero;
pub mod map_view;
pub mod monitoring;
pub mod navbar;
pub mod properties_card;
pub mod save_aoi_modal;
pub mod toasts;
