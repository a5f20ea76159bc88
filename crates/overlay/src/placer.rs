//! Popup placement relative to an anchor's screen position.
//!
//! The popup footprint is assumed, not measured: 220 px wide, 250 px tall
//! when detailed and 100 px when minimized. The connector runs perpendicular
//! from the anchor to the popup edge facing it.

use foundation::screen::{ScreenOffset, ScreenPoint, ScreenRect, ScreenSize, Segment};
use serde::Serialize;

use crate::direction::Direction;

pub const POPUP_WIDTH_PX: f64 = 220.0;
pub const DETAILED_HEIGHT_PX: f64 = 250.0;
pub const MINIMIZED_HEIGHT_PX: f64 = 100.0;
pub const CONNECTOR_LENGTH_PX: f64 = 80.0;
pub const COMPACT_CONNECTOR_LENGTH_PX: f64 = 40.0;
/// Extra spacing on the bottom and left sides.
pub const POPUP_GAP_PX: f64 = 5.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PopupGeometry {
    pub width: f64,
    pub detailed_height: f64,
    pub minimized_height: f64,
    pub connector_length: f64,
    pub gap: f64,
}

impl PopupGeometry {
    pub fn standard() -> Self {
        Self {
            width: POPUP_WIDTH_PX,
            detailed_height: DETAILED_HEIGHT_PX,
            minimized_height: MINIMIZED_HEIGHT_PX,
            connector_length: CONNECTOR_LENGTH_PX,
            gap: POPUP_GAP_PX,
        }
    }

    /// Shorter connector for dense layouts.
    pub fn compact() -> Self {
        Self {
            connector_length: COMPACT_CONNECTOR_LENGTH_PX,
            ..Self::standard()
        }
    }

    pub fn footprint(&self, minimized: bool) -> ScreenSize {
        let height = if minimized {
            self.minimized_height
        } else {
            self.detailed_height
        };
        ScreenSize::new(self.width, height)
    }

    /// Popup rectangle for `direction`, shifted by the user's `manual_offset`.
    pub fn place_rect(
        &self,
        anchor: ScreenPoint,
        direction: Direction,
        minimized: bool,
        manual_offset: ScreenOffset,
    ) -> ScreenRect {
        place_rect(
            anchor,
            direction,
            self.footprint(minimized),
            self.connector_length,
            self.gap,
            manual_offset,
        )
    }
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Anchor-relative popup rectangle.
///
/// - top: centered above, `height + connector` up.
/// - bottom: centered below, `connector + gap` down.
/// - left: centered beside, `width + connector + gap` left.
/// - right: centered beside, `connector` right.
pub fn place_rect(
    anchor: ScreenPoint,
    direction: Direction,
    size: ScreenSize,
    connector_length: f64,
    gap: f64,
    manual_offset: ScreenOffset,
) -> ScreenRect {
    let (left, top) = match direction {
        Direction::Top => (
            anchor.x - size.width / 2.0,
            anchor.y - size.height - connector_length,
        ),
        Direction::Bottom => (
            anchor.x - size.width / 2.0,
            anchor.y + connector_length + gap,
        ),
        Direction::Left => (
            anchor.x - size.width - connector_length - gap,
            anchor.y - size.height / 2.0,
        ),
        Direction::Right => (anchor.x + connector_length, anchor.y - size.height / 2.0),
    };
    ScreenRect::new(left, top, size).translate(manual_offset)
}

/// Line from the anchor to the popup's center.
pub fn connector(anchor: ScreenPoint, popup: &ScreenRect) -> Segment {
    Segment::new(anchor, popup.center())
}
