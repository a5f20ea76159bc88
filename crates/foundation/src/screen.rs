//! Screen-space (CSS pixel) geometry for markers and overlays.
//!
//! Axes follow the rendering surface: +x right, +y down.

use serde::{Deserialize, Serialize};

use crate::math::LatLng;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: ScreenOffset) -> Self {
        Self::new(self.x + by.dx, self.y + by.dy)
    }

    /// Displacement that moves `origin` onto `self`.
    pub fn delta_from(self, origin: ScreenPoint) -> ScreenOffset {
        ScreenOffset::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenOffset {
    pub dx: f64,
    pub dy: f64,
}

impl ScreenOffset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned screen rectangle anchored at its top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, size: ScreenSize) -> Self {
        Self {
            left,
            top,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.left, self.top)
    }

    pub fn size(&self) -> ScreenSize {
        ScreenSize::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn translate(self, by: ScreenOffset) -> Self {
        Self {
            left: self.left + by.dx,
            top: self.top + by.dy,
            ..self
        }
    }

    pub fn moved_to(self, origin: ScreenPoint) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            ..self
        }
    }

    /// Edge-touching rectangles count as intersecting.
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        !(self.right() < other.left
            || self.left > other.right()
            || self.bottom() < other.top
            || self.top > other.bottom())
    }
}

/// Straight line between two screen points.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

impl Segment {
    pub fn new(from: ScreenPoint, to: ScreenPoint) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

/// Per-edge insets in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Geographic → screen projection supplied by a rendering surface.
///
/// Returns `None` while the surface cannot report a projection yet.
pub trait Projector {
    fn project(&self, position: LatLng) -> Option<ScreenPoint>;
}
