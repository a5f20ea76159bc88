use foundation::ids::{MarkerId, OverlayId};
use foundation::screen::ScreenPoint;
use overlay::drawable::HitTarget;

/// Notifications a surface queues for the session to consume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SurfaceEvent {
    MarkerClicked(MarkerId),
    /// Center or zoom moved; open overlays must reproject.
    CameraChanged,
    /// A bounds fit finished and the camera reflects it.
    BoundsSettled,
    PointerDown {
        overlay: OverlayId,
        target: HitTarget,
        position: ScreenPoint,
    },
    PointerMove {
        position: ScreenPoint,
    },
    PointerUp,
    ToggleClicked(OverlayId),
    CloseClicked(OverlayId),
}

impl SurfaceEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SurfaceEvent::MarkerClicked(_) => "marker_clicked",
            SurfaceEvent::CameraChanged => "camera_changed",
            SurfaceEvent::BoundsSettled => "bounds_settled",
            SurfaceEvent::PointerDown { .. } => "pointer_down",
            SurfaceEvent::PointerMove { .. } => "pointer_move",
            SurfaceEvent::PointerUp => "pointer_up",
            SurfaceEvent::ToggleClicked(_) => "toggle_clicked",
            SurfaceEvent::CloseClicked(_) => "close_clicked",
        }
    }
}
