//! Selection and highlight state.
//!
//! A region tracks its own `selected`/`highlighted` flags, while "which region
//! is selected" lives in a [`SelectionSlot`] owned by the image (and a second
//! slot for the session's highlighted node). Slots are only changed through
//! the session's select/deselect operations.

use crate::model::{PointRegion, RegionId};

/// Per-region selection flags.
pub trait Selectable {
    /// Whether this region is the selected one.
    fn is_selected(&self) -> bool;

    /// Set the selected flag without touching any slot.
    fn set_selected(&mut self, selected: bool);

    /// Whether the region shows hover feedback.
    fn is_highlighted(&self) -> bool;

    /// Toggle hover feedback. Independent of selection.
    fn set_highlight(&mut self, highlighted: bool);
}

impl Selectable for PointRegion {
    fn is_selected(&self) -> bool {
        self.selected_flag()
    }

    fn set_selected(&mut self, selected: bool) {
        self.set_selected_flag(selected);
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted_flag()
    }

    fn set_highlight(&mut self, highlighted: bool) {
        self.set_highlighted_flag(highlighted);
    }
}

/// Holds at most one region id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSlot {
    current: Option<RegionId>,
}

impl SelectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id currently held.
    pub fn current(&self) -> Option<&RegionId> {
        self.current.as_ref()
    }

    /// Whether the slot holds `id`.
    pub fn holds(&self, id: &RegionId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Store `id` and return the previously held id if it was a different one.
    pub fn replace(&mut self, id: RegionId) -> Option<RegionId> {
        match self.current.replace(id) {
            Some(prev) if Some(&prev) != self.current.as_ref() => Some(prev),
            _ => None,
        }
    }

    /// Clear the slot only if it still holds `id`.
    pub fn clear_if(&mut self, id: &RegionId) -> bool {
        if self.holds(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Cursor style the rendering layer should show after a hover change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
    /// Relation drawing target
    Crosshair,
}
