use foundation::ids::OverlayId;
use foundation::screen::{Projector, ScreenRect, Segment};

use crate::content::PopupContent;

/// Overlay layer of a rendering surface.
///
/// The surface owns the actual elements; overlays only tell it what to
/// show and where.
pub trait OverlayPane: Projector {
    fn insert_overlay(&mut self, id: OverlayId, content: &PopupContent);
    fn replace_content(&mut self, id: OverlayId, content: &PopupContent);
    fn position_overlay(&mut self, id: OverlayId, rect: ScreenRect, connector: Segment);
    fn remove_overlay(&mut self, id: OverlayId);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    /// Projection unavailable this frame; retried on the next redraw.
    Skipped,
    /// Nothing open to draw.
    Idle,
}

/// Capability set of anything that lives in the overlay pane.
pub trait Drawable {
    fn on_add(&mut self, pane: &mut dyn OverlayPane);
    fn draw(&mut self, pane: &mut dyn OverlayPane) -> DrawOutcome;
    fn on_remove(&mut self, pane: &mut dyn OverlayPane);
}

/// Part of a popup a pointer-down landed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Body,
    CloseControl,
    ToggleControl,
    Link,
}

impl HitTarget {
    /// Controls and links keep their click behaviour; only the body drags.
    pub fn starts_drag(self) -> bool {
        matches!(self, HitTarget::Body)
    }
}
