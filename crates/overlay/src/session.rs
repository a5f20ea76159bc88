use foundation::ids::OverlayId;
use foundation::math::LatLng;
use foundation::screen::{ScreenOffset, ScreenPoint, ScreenRect, Segment};
use tracing::trace;

use crate::content::PopupContent;
use crate::direction::Direction;
use crate::drawable::{DrawOutcome, Drawable, HitTarget, OverlayPane};
use crate::placer::{PopupGeometry, connector};

/// Where a popup was last put on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub anchor: ScreenPoint,
    pub rect: ScreenRect,
    pub connector: Segment,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragState {
    pointer_start: ScreenPoint,
    rect_start: ScreenRect,
}

/// One open popup, from open to explicit close.
///
/// The direction is fixed at creation. `minimized` and `manual_offset`
/// survive every redraw; only a reopen replaces the session.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupSession {
    id: OverlayId,
    anchor: LatLng,
    geometry: PopupGeometry,
    direction: Direction,
    minimized: bool,
    manual_offset: Option<ScreenOffset>,
    content: PopupContent,
    placement: Option<Placement>,
    drag: Option<DragState>,
    attached: bool,
}

impl PopupSession {
    pub fn new(
        id: OverlayId,
        anchor: LatLng,
        geometry: PopupGeometry,
        direction: Direction,
        content: PopupContent,
    ) -> Self {
        Self {
            id,
            anchor,
            geometry,
            direction,
            minimized: content.minimized,
            manual_offset: None,
            content,
            placement: None,
            drag: None,
            attached: false,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn anchor(&self) -> LatLng {
        self.anchor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn manual_offset(&self) -> Option<ScreenOffset> {
        self.manual_offset
    }

    pub fn content(&self) -> &PopupContent {
        &self.content
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Direction-computed rect, ignoring the user's offset.
    pub fn default_rect(&self, anchor_px: ScreenPoint) -> ScreenRect {
        self.geometry
            .place_rect(anchor_px, self.direction, self.minimized, ScreenOffset::ZERO)
    }

    /// Rect the popup rests at when no drag is in flight.
    pub fn resting_rect(&self, anchor_px: ScreenPoint) -> ScreenRect {
        self.default_rect(anchor_px)
            .translate(self.manual_offset.unwrap_or(ScreenOffset::ZERO))
    }

    pub(crate) fn set_content(&mut self, content: PopupContent, pane: &mut dyn OverlayPane) {
        self.minimized = content.minimized;
        self.content = content;
        if self.attached {
            pane.replace_content(self.id, &self.content);
        }
    }

    /// Starts a drag if the pointer landed on the popup body.
    pub fn begin_drag(&mut self, pointer: ScreenPoint, target: HitTarget) -> bool {
        if !target.starts_drag() {
            return false;
        }
        let Some(placement) = self.placement else {
            return false;
        };
        self.drag = Some(DragState {
            pointer_start: pointer,
            rect_start: placement.rect,
        });
        true
    }

    /// Moves the popup with the pointer. Position-only; safe to call at
    /// pointer-move frequency.
    pub fn drag_to(&mut self, pointer: ScreenPoint, pane: &mut dyn OverlayPane) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(last) = self.placement else {
            return false;
        };

        let origin = drag
            .rect_start
            .origin()
            .offset(pointer.delta_from(drag.pointer_start));
        let rect = drag.rect_start.moved_to(origin);
        let anchor = pane
            .project(self.anchor)
            .filter(ScreenPoint::is_finite)
            .unwrap_or(last.anchor);
        let line = connector(anchor, &rect);

        pane.position_overlay(self.id, rect, line);
        self.placement = Some(Placement {
            anchor,
            rect,
            connector: line,
        });
        true
    }

    /// Ends a drag and remembers where the user left the popup relative to
    /// its direction-computed default.
    ///
    /// Without a projection the previous offset is kept.
    pub fn end_drag(&mut self, pane: &dyn OverlayPane) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        let (Some(anchor_px), Some(placement)) = (
            pane.project(self.anchor).filter(ScreenPoint::is_finite),
            self.placement,
        ) else {
            return true;
        };
        let default = self.default_rect(anchor_px);
        self.manual_offset = Some(placement.rect.origin().delta_from(default.origin()));
        true
    }
}

impl Drawable for PopupSession {
    fn on_add(&mut self, pane: &mut dyn OverlayPane) {
        pane.insert_overlay(self.id, &self.content);
        self.attached = true;
    }

    fn draw(&mut self, pane: &mut dyn OverlayPane) -> DrawOutcome {
        if !self.attached {
            return DrawOutcome::Idle;
        }
        let Some(anchor_px) = pane.project(self.anchor).filter(ScreenPoint::is_finite) else {
            trace!(overlay = self.id.0, "projection unavailable, skipping frame");
            return DrawOutcome::Skipped;
        };

        // An in-flight drag owns the position; only the connector follows.
        let rect = match (self.drag, self.placement) {
            (Some(_), Some(p)) => p.rect,
            _ => self.resting_rect(anchor_px),
        };
        let line = connector(anchor_px, &rect);

        pane.position_overlay(self.id, rect, line);
        self.placement = Some(Placement {
            anchor: anchor_px,
            rect,
            connector: line,
        });
        DrawOutcome::Drawn
    }

    fn on_remove(&mut self, pane: &mut dyn OverlayPane) {
        if self.attached {
            pane.remove_overlay(self.id);
        }
        self.attached = false;
        self.drag = None;
        self.placement = None;
    }
}
