//! In-process Web-Mercator surface.
//!
//! Keeps the camera, markers and overlay frames in memory so the whole
//! engine can run (and be inspected) without a browser or mapping SDK.

use std::collections::{BTreeMap, VecDeque};

use foundation::bounds::LatLngBounds;
use foundation::ids::{MarkerId, OverlayId};
use foundation::math::{LatLng, from_world_px, to_world_px};
use foundation::screen::{Padding, Projector, ScreenPoint, ScreenRect, ScreenSize, Segment};
use layers::markers::MarkerSpec;
use overlay::content::PopupContent;
use overlay::drawable::{HitTarget, OverlayPane};
use serde::Serialize;
use tracing::{debug, trace};

use crate::events::SurfaceEvent;
use crate::map_surface::MapSurface;

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 21;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub spec: MarkerSpec,
}

/// Last frame an overlay was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayElement {
    pub content: PopupContent,
    /// Unset until the first successful draw.
    pub rect: Option<ScreenRect>,
    pub connector: Option<Segment>,
}

#[derive(Debug, Clone)]
pub struct MercatorSurface {
    viewport: ScreenSize,
    center: LatLng,
    zoom: u8,
    projection_ready: bool,
    next_marker: u32,
    markers: Vec<PlacedMarker>,
    overlays: BTreeMap<OverlayId, OverlayElement>,
    title: String,
    events: VecDeque<SurfaceEvent>,
}

impl MercatorSurface {
    pub fn new(viewport: ScreenSize) -> Self {
        Self {
            viewport,
            center: LatLng::new(0.0, 0.0),
            zoom: MIN_ZOOM,
            projection_ready: true,
            next_marker: 0,
            markers: Vec::new(),
            overlays: BTreeMap::new(),
            title: String::new(),
            events: VecDeque::new(),
        }
    }

    pub fn viewport(&self) -> ScreenSize {
        self.viewport
    }

    pub fn markers(&self) -> &[PlacedMarker] {
        &self.markers
    }

    pub fn overlays(&self) -> &BTreeMap<OverlayId, OverlayElement> {
        &self.overlays
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&OverlayElement> {
        self.overlays.get(&id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Simulates the SDK not having a projection yet (e.g. before the first
    /// idle). Overlays skip their draws while this is off.
    pub fn set_projection_ready(&mut self, ready: bool) {
        self.projection_ready = ready;
    }

    /// Drags the map by a screen delta, like a user pan.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let zoom = f64::from(self.zoom);
        let [cx, cy] = to_world_px(self.center, zoom);
        self.center = from_world_px([cx - dx, cy - dy], zoom);
        self.events.push_back(SurfaceEvent::CameraChanged);
    }

    pub fn click_marker(&mut self, id: MarkerId) {
        self.events.push_back(SurfaceEvent::MarkerClicked(id));
    }

    pub fn click_toggle(&mut self, id: OverlayId) {
        self.events.push_back(SurfaceEvent::ToggleClicked(id));
    }

    pub fn click_close(&mut self, id: OverlayId) {
        self.events.push_back(SurfaceEvent::CloseClicked(id));
    }

    pub fn press(&mut self, overlay: OverlayId, target: HitTarget, position: ScreenPoint) {
        self.events.push_back(SurfaceEvent::PointerDown {
            overlay,
            target,
            position,
        });
    }

    pub fn move_pointer(&mut self, position: ScreenPoint) {
        self.events.push_back(SurfaceEvent::PointerMove { position });
    }

    pub fn release(&mut self) {
        self.events.push_back(SurfaceEvent::PointerUp);
    }

    /// Largest integer zoom at which `bounds` fits the padded viewport.
    fn fitting_zoom(&self, bounds: &LatLngBounds, padding: &Padding) -> u8 {
        let avail_w = (self.viewport.width - padding.horizontal()).max(1.0);
        let avail_h = (self.viewport.height - padding.vertical()).max(1.0);

        let mut best = MIN_ZOOM;
        for zoom in MIN_ZOOM..=MAX_ZOOM {
            let z = f64::from(zoom);
            let nw = to_world_px(bounds.north_west(), z);
            let se = to_world_px(bounds.south_east(), z);
            if (se[0] - nw[0]).abs() <= avail_w && (se[1] - nw[1]).abs() <= avail_h {
                best = zoom;
            } else {
                break;
            }
        }
        best
    }
}

impl Projector for MercatorSurface {
    fn project(&self, position: LatLng) -> Option<ScreenPoint> {
        if !self.projection_ready || !position.is_finite() {
            return None;
        }
        let zoom = f64::from(self.zoom);
        let [px, py] = to_world_px(position, zoom);
        let [cx, cy] = to_world_px(self.center, zoom);
        Some(ScreenPoint::new(
            px - cx + self.viewport.width * 0.5,
            py - cy + self.viewport.height * 0.5,
        ))
    }
}

impl OverlayPane for MercatorSurface {
    fn insert_overlay(&mut self, id: OverlayId, content: &PopupContent) {
        self.overlays.insert(
            id,
            OverlayElement {
                content: content.clone(),
                rect: None,
                connector: None,
            },
        );
    }

    fn replace_content(&mut self, id: OverlayId, content: &PopupContent) {
        if let Some(el) = self.overlays.get_mut(&id) {
            el.content = content.clone();
        }
    }

    fn position_overlay(&mut self, id: OverlayId, rect: ScreenRect, connector: Segment) {
        if let Some(el) = self.overlays.get_mut(&id) {
            el.rect = Some(rect);
            el.connector = Some(connector);
        } else {
            trace!(overlay = id.0, "position for unknown overlay ignored");
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id);
    }
}

impl MapSurface for MercatorSurface {
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.push(PlacedMarker {
            id,
            spec: spec.clone(),
        });
        id
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
        self.events.push_back(SurfaceEvent::CameraChanged);
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.events.push_back(SurfaceEvent::CameraChanged);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, padding: Padding) {
        let zoom = self.fitting_zoom(&bounds, &padding);
        let z = f64::from(zoom);
        let nw = to_world_px(bounds.north_west(), z);
        let se = to_world_px(bounds.south_east(), z);

        // Center the bounds inside the padded area, not the full viewport.
        let mid_x = (nw[0] + se[0]) * 0.5 - (padding.left - padding.right) * 0.5;
        let mid_y = (nw[1] + se[1]) * 0.5 - (padding.top - padding.bottom) * 0.5;

        self.zoom = zoom;
        self.center = from_world_px([mid_x, mid_y], z);
        debug!(zoom, "bounds fitted");
        self.events.push_back(SurfaceEvent::CameraChanged);
        self.events.push_back(SurfaceEvent::BoundsSettled);
    }

    fn set_document_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn poll_event(&mut self) -> Option<SurfaceEvent> {
        self.events.pop_front()
    }
}
