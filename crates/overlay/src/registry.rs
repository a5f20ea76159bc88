use foundation::ids::OverlayId;

use crate::direction::{Direction, direction_for_open_count};

/// Ordered set of currently open popups for one map view.
///
/// Only used to pick the direction of newly opened popups, so insertion
/// order is preserved on removal. Mutated from the event loop only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpenOverlayRegistry {
    next_id: u64,
    open: Vec<OverlayId>,
}

impl OpenOverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id for a popup being opened and picks its direction
    /// from the number of popups already open.
    pub fn register(&mut self) -> (OverlayId, Direction) {
        let direction = direction_for_open_count(self.open.len());
        let id = OverlayId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.open.push(id);
        (id, direction)
    }

    /// Returns `true` if the popup was open.
    pub fn remove(&mut self, id: OverlayId) -> bool {
        let Some(pos) = self.open.iter().position(|o| *o == id) else {
            return false;
        };
        self.open.remove(pos);
        true
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.open.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open popups in the order they were opened.
    pub fn iter(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.open.iter().copied()
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }
}
