//! Drives one map view.
//!
//! Load sequence: validate pins, cluster, plan the camera, place one marker
//! per group, set the document title. Afterwards [`MapSessionCoordinator::pump`]
//! routes surface events to the per-marker popup controllers.

use foundation::ids::{MarkerId, OverlayId, PinIndex};
use layers::markers::MarkerLayer;
use overlay::controller::OverlayController;
use overlay::drawable::{DrawOutcome, OverlayPane};
use overlay::placer::PopupGeometry;
use overlay::registry::OpenOverlayRegistry;
use runtime::frame::Frame;
use runtime::journal::Journal;
use runtime::metrics::Metrics;
use scene::camera::{CameraPlan, ViewportConfig, ViewportPlanner};
use scene::cluster::{ClusterConfig, ClusterEngine};
use scene::pin::{Group, Pin};
use surface::events::SurfaceEvent;
use surface::map_surface::MapSurface;
use tracing::{debug, info};

use crate::error::MapError;

pub const FALLBACK_TITLE: &str = "pinmap - Map";
pub const NO_PINS_MESSAGE: &str = "this map has no pins";

const MARKER_LAYER_ID: u64 = 1;

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub cluster: ClusterConfig,
    pub viewport: ViewportConfig,
    pub popup: PopupGeometry,
}

/// A placed marker and the popup it owns.
#[derive(Debug, Clone)]
pub struct MarkerSlot {
    pub id: MarkerId,
    pub controller: OverlayController,
}

pub struct MapSessionCoordinator<S: MapSurface> {
    surface: S,
    clusterer: ClusterEngine,
    planner: ViewportPlanner,
    popup: PopupGeometry,
    groups: Vec<Group>,
    markers: Vec<MarkerSlot>,
    registry: OpenOverlayRegistry,
    /// Set while a bounds fit awaits its one-step zoom out.
    pending_zoom_out: bool,
    /// Slot whose popup is being dragged.
    dragging: Option<usize>,
    frame: Frame,
    journal: Journal,
    metrics: Metrics,
}

impl<S: MapSurface> MapSessionCoordinator<S> {
    pub fn new(surface: S, config: SessionConfig) -> Self {
        Self {
            surface,
            clusterer: ClusterEngine::new(config.cluster),
            planner: ViewportPlanner::new(config.viewport),
            popup: config.popup,
            groups: Vec::new(),
            markers: Vec::new(),
            registry: OpenOverlayRegistry::new(),
            pending_zoom_out: false,
            dragging: None,
            frame: Frame::default(),
            journal: Journal::default(),
            metrics: Metrics::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn markers(&self) -> &[MarkerSlot] {
        &self.markers
    }

    pub fn registry(&self) -> &OpenOverlayRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn controller(&self, marker: MarkerId) -> Option<&OverlayController> {
        self.slot_for_marker(marker).map(|i| &self.markers[i].controller)
    }

    /// Marker whose group contains the pin at `index`.
    pub fn marker_for_pin(&self, index: PinIndex) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|slot| slot.controller.group().indices().any(|i| i == index))
            .map(|slot| slot.id)
    }

    /// Replaces whatever is shown with `pins`.
    pub fn load_map(&mut self, title: &str, pins: &[Pin]) -> Result<CameraPlan, MapError> {
        if pins.is_empty() {
            return Err(MapError::Validation(NO_PINS_MESSAGE.to_string()));
        }
        self.teardown();

        self.groups = self.clusterer.cluster(pins);
        let plan = self
            .planner
            .plan(&self.groups)
            .ok_or_else(|| MapError::Validation(NO_PINS_MESSAGE.to_string()))?;
        self.apply_camera(&plan);

        let layer = MarkerLayer::from_groups(MARKER_LAYER_ID, &self.groups);
        for (spec, group) in layer.specs().iter().zip(&self.groups) {
            let id = self.surface.add_marker(spec);
            self.markers.push(MarkerSlot {
                id,
                controller: OverlayController::new(group.clone(), self.popup),
            });
        }

        let title = match title.trim() {
            "" => FALLBACK_TITLE,
            t => t,
        };
        self.surface.set_document_title(title);

        info!(
            pins = pins.len(),
            groups = self.groups.len(),
            %title,
            "map loaded"
        );
        self.journal.record(
            self.frame,
            "map_loaded",
            format!("{} pins in {} markers", pins.len(), self.markers.len()),
        );
        Ok(plan)
    }

    fn apply_camera(&mut self, plan: &CameraPlan) {
        match *plan {
            CameraPlan::Center { center, zoom } => {
                self.pending_zoom_out = false;
                self.surface.set_center(center);
                self.surface.set_zoom(zoom);
            }
            CameraPlan::FitBounds {
                bounds,
                padding,
                initial_center,
            } => {
                self.pending_zoom_out = true;
                self.surface.set_center(initial_center);
                self.surface.fit_bounds(bounds, padding);
            }
        }
    }

    /// Handles every queued surface event. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.surface.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::MarkerClicked(marker) => {
                if let Some(i) = self.slot_for_marker(marker) {
                    self.release_drag_of(i);
                    let id = self.markers[i]
                        .controller
                        .open(&mut self.registry, &mut self.surface);
                    let placed = self.markers[i]
                        .controller
                        .session()
                        .is_some_and(|s| s.placement().is_some());
                    self.count_draw(if placed {
                        DrawOutcome::Drawn
                    } else {
                        DrawOutcome::Skipped
                    });
                    self.log(event, format!("marker {} opened overlay {}", marker.0, id.0));
                    self.sync_open_gauge();
                }
            }
            SurfaceEvent::CameraChanged => {
                self.frame = self.frame.next();
                self.redraw_all();
            }
            SurfaceEvent::BoundsSettled => {
                if self.pending_zoom_out {
                    self.pending_zoom_out = false;
                    let fitted = self.surface.zoom();
                    let zoom = self.planner.settled_zoom(fitted);
                    debug!(fitted, zoom, "fit settled");
                    if zoom != fitted {
                        self.surface.set_zoom(zoom);
                    }
                    self.log(event, format!("zoom {fitted} -> {zoom}"));
                }
            }
            SurfaceEvent::PointerDown {
                overlay,
                target,
                position,
            } => {
                let Some(i) = self.slot_for_overlay(overlay) else {
                    return;
                };
                // A press without a release in between finishes the earlier drag.
                if let Some(prev) = self.dragging
                    && prev != i
                {
                    self.release_drag_of(prev);
                }
                if self.markers[i].controller.pointer_down(position, target) {
                    self.dragging = Some(i);
                    self.log(event, format!("drag started on overlay {}", overlay.0));
                }
            }
            SurfaceEvent::PointerMove { position } => {
                if let Some(i) = self.dragging
                    && self.markers[i]
                        .controller
                        .pointer_move(position, &mut self.surface)
                {
                    self.metrics.inc_counter("drag.moves", 1);
                }
            }
            SurfaceEvent::PointerUp => {
                if let Some(i) = self.dragging.take() {
                    self.markers[i].controller.pointer_up(&self.surface);
                    let offset = self.markers[i]
                        .controller
                        .session()
                        .and_then(|s| s.manual_offset());
                    self.log(event, format!("drag ended, offset {offset:?}"));
                }
            }
            SurfaceEvent::ToggleClicked(overlay) => {
                if let Some(i) = self.slot_for_overlay(overlay) {
                    if self.dragging == Some(i) {
                        self.dragging = None;
                    }
                    self.markers[i].controller.toggle(&mut self.surface);
                    let state = self.markers[i].controller.state();
                    self.log(event, format!("overlay {} now {state:?}", overlay.0));
                }
            }
            SurfaceEvent::CloseClicked(overlay) => {
                if let Some(i) = self.slot_for_overlay(overlay) {
                    self.release_drag_of(i);
                    self.markers[i]
                        .controller
                        .close(&mut self.registry, &mut self.surface);
                    self.log(event, format!("overlay {} closed", overlay.0));
                    self.sync_open_gauge();
                }
            }
        }
    }

    /// Closes every popup and removes the markers.
    pub fn teardown(&mut self) {
        for slot in &mut self.markers {
            slot.controller.close(&mut self.registry, &mut self.surface);
        }
        self.registry.clear();
        self.surface.clear_markers();
        self.markers.clear();
        self.groups.clear();
        self.dragging = None;
        self.pending_zoom_out = false;
        self.sync_open_gauge();
    }

    fn redraw_all(&mut self) {
        let pane: &mut dyn OverlayPane = &mut self.surface;
        let outcomes: Vec<DrawOutcome> = self
            .markers
            .iter_mut()
            .map(|slot| slot.controller.redraw(pane))
            .collect();
        for outcome in outcomes {
            self.count_draw(outcome);
        }
    }

    /// Counts first placements on open as well as redraws.
    fn count_draw(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::Drawn => self.metrics.inc_counter("overlay.draws", 1),
            DrawOutcome::Skipped => self.metrics.inc_counter("overlay.skipped_frames", 1),
            DrawOutcome::Idle => {}
        }
    }

    fn release_drag_of(&mut self, slot: usize) {
        if self.dragging == Some(slot) {
            self.dragging = None;
            self.markers[slot].controller.pointer_up(&self.surface);
        }
    }

    fn slot_for_marker(&self, marker: MarkerId) -> Option<usize> {
        self.markers.iter().position(|s| s.id == marker)
    }

    fn slot_for_overlay(&self, overlay: OverlayId) -> Option<usize> {
        self.markers
            .iter()
            .position(|s| s.controller.overlay_id() == Some(overlay))
    }

    fn sync_open_gauge(&mut self) {
        self.metrics
            .set_gauge("overlay.open", self.registry.len() as i64);
    }

    fn log(&mut self, event: SurfaceEvent, message: String) {
        self.journal.record(self.frame, event.kind(), message);
    }
}
