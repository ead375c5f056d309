//! AOI list state for the dashboard container.
//!
//! DESIGN
//! ======
//! The list is only patched after the backend answers, so a failed call
//! leaves it untouched. Mutations are serialized per id: while one request
//! for an AOI is outstanding, further create/update/delete/toggle intents
//! for that id are refused.

#[cfg(test)]
#[path = "aois_test.rs"]
mod aois_test;

use std::collections::HashSet;

use crate::net::types::Aoi;

/// Shared AOI list state.
#[derive(Clone, Debug, Default)]
pub struct AoisState {
    pub items: Vec<Aoi>,
    pub loading: bool,
    pub error: Option<String>,
    /// AOI the map should focus and highlight.
    pub preview_id: Option<i64>,
    pending: HashSet<i64>,
    removed: HashSet<i64>,
}

impl AoisState {
    /// Replace the whole list with a fresh fetch.
    pub fn replace_all(&mut self, items: Vec<Aoi>) {
        self.items = items;
        self.loading = false;
        self.error = None;
        self.removed.clear();
        if self.preview_id.is_some_and(|id| self.find(id).is_none()) {
            self.preview_id = None;
        }
    }

    /// Append a record returned by create. A record whose id is already
    /// listed replaces that entry instead.
    pub fn insert_created(&mut self, aoi: Aoi) {
        if let Some(id) = aoi.id {
            self.removed.remove(&id);
            if let Some(slot) = self.items.iter_mut().find(|a| a.id == Some(id)) {
                *slot = aoi;
                return;
            }
        }
        self.items.push(aoi);
    }

    /// Replace the entry matching the server response by id.
    ///
    /// Returns false when no such entry is listed; a record deleted while
    /// its update was in flight is not re-inserted.
    pub fn apply_updated(&mut self, aoi: Aoi) -> bool {
        let Some(id) = aoi.id else {
            return false;
        };
        if self.removed.contains(&id) {
            return false;
        }
        match self.items.iter_mut().find(|a| a.id == Some(id)) {
            Some(slot) => {
                *slot = aoi;
                true
            }
            None => false,
        }
    }

    /// Drop the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != Some(id));
        self.removed.insert(id);
        if self.preview_id == Some(id) {
            self.preview_id = None;
        }
        self.items.len() != before
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Aoi> {
        self.items.iter().find(|a| a.id == Some(id))
    }

    /// Claim the in-flight slot for `id`. Returns false when another
    /// mutation on the same id has not finished yet.
    pub fn begin_mutation(&mut self, id: i64) -> bool {
        self.pending.insert(id)
    }

    /// Release the in-flight slot for `id`.
    pub fn end_mutation(&mut self, id: i64) {
        self.pending.remove(&id);
    }

    #[must_use]
    pub fn is_pending(&self, id: i64) -> bool {
        self.pending.contains(&id)
    }

    /// Focus `id` on the map. Unknown ids are ignored.
    pub fn focus(&mut self, id: i64) {
        if self.find(id).is_some() {
            self.preview_id = Some(id);
        }
    }
}
