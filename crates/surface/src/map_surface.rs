use foundation::bounds::LatLngBounds;
use foundation::ids::MarkerId;
use foundation::math::LatLng;
use foundation::screen::Padding;
use layers::markers::MarkerSpec;
use overlay::drawable::OverlayPane;

use crate::events::SurfaceEvent;

/// What the engine needs from a mapping SDK.
///
/// Overlay placement goes through the [`OverlayPane`] supertrait, which in
/// turn carries the surface's projection.
pub trait MapSurface: OverlayPane {
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerId;
    fn clear_markers(&mut self);

    fn center(&self) -> LatLng;
    fn set_center(&mut self, center: LatLng);
    fn zoom(&self) -> u8;
    fn set_zoom(&mut self, zoom: u8);

    /// Frames `bounds` inside the padded viewport. Completion is reported
    /// asynchronously with [`SurfaceEvent::BoundsSettled`].
    fn fit_bounds(&mut self, bounds: LatLngBounds, padding: Padding);

    fn set_document_title(&mut self, title: &str);

    fn poll_event(&mut self) -> Option<SurfaceEvent>;
}
