//! Per-marker popup controller.
//!
//! States: `Closed → Detailed ⇄ Minimized → Closed`. A marker click opens
//! (or recreates) the popup, the toggle control flips detailed/minimized in
//! place, pointer events drag it, the close control removes it.

use foundation::ids::OverlayId;
use foundation::screen::ScreenPoint;
use scene::pin::Group;
use serde::Serialize;
use tracing::debug;

use crate::content::PopupContent;
use crate::drawable::{DrawOutcome, Drawable, HitTarget, OverlayPane};
use crate::placer::PopupGeometry;
use crate::registry::OpenOverlayRegistry;
use crate::session::PopupSession;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayState {
    Closed,
    Detailed,
    Minimized,
}

#[derive(Debug, Clone)]
pub struct OverlayController {
    group: Group,
    geometry: PopupGeometry,
    /// Last shown form; a reopened popup starts in it.
    minimized: bool,
    session: Option<PopupSession>,
}

impl OverlayController {
    pub fn new(group: Group, geometry: PopupGeometry) -> Self {
        Self {
            group,
            geometry,
            minimized: false,
            session: None,
        }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn session(&self) -> Option<&PopupSession> {
        self.session.as_ref()
    }

    pub fn overlay_id(&self) -> Option<OverlayId> {
        self.session.as_ref().map(PopupSession::id)
    }

    pub fn state(&self) -> OverlayState {
        match &self.session {
            None => OverlayState::Closed,
            Some(s) if s.is_minimized() => OverlayState::Minimized,
            Some(_) => OverlayState::Detailed,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(PopupSession::is_dragging)
    }

    /// Opens the popup. An already open popup is replaced by a fresh one in
    /// the same detailed/minimized form, with its direction chosen anew and
    /// any manual offset dropped.
    pub fn open(
        &mut self,
        registry: &mut OpenOverlayRegistry,
        pane: &mut dyn OverlayPane,
    ) -> OverlayId {
        self.close(registry, pane);

        let (id, direction) = registry.register();
        let content = PopupContent::render(&self.group, self.minimized);
        let mut session =
            PopupSession::new(id, self.group.anchor(), self.geometry, direction, content);
        session.on_add(pane);
        session.draw(pane);

        debug!(
            overlay = id.0,
            direction = direction.as_str(),
            open = registry.len(),
            "opened popup"
        );
        self.session = Some(session);
        id
    }

    /// Flips detailed/minimized in place. Returns `false` when closed.
    pub fn toggle(&mut self, pane: &mut dyn OverlayPane) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.end_drag(pane);
        let minimized = !session.is_minimized();
        session.set_content(PopupContent::render(&self.group, minimized), pane);
        session.draw(pane);
        self.minimized = minimized;
        true
    }

    /// Returns `false` when already closed.
    pub fn close(
        &mut self,
        registry: &mut OpenOverlayRegistry,
        pane: &mut dyn OverlayPane,
    ) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.on_remove(pane);
        registry.remove(session.id());
        debug!(overlay = session.id().0, open = registry.len(), "closed popup");
        true
    }

    /// Re-anchors the popup after a camera change.
    pub fn redraw(&mut self, pane: &mut dyn OverlayPane) -> DrawOutcome {
        match self.session.as_mut() {
            Some(session) => session.draw(pane),
            None => DrawOutcome::Idle,
        }
    }

    pub fn pointer_down(&mut self, pointer: ScreenPoint, target: HitTarget) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.begin_drag(pointer, target))
    }

    pub fn pointer_move(&mut self, pointer: ScreenPoint, pane: &mut dyn OverlayPane) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.drag_to(pointer, pane))
    }

    pub fn pointer_up(&mut self, pane: &dyn OverlayPane) -> bool {
        self.session.as_mut().is_some_and(|s| s.end_drag(pane))
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayController, OverlayState};
    use crate::content::PopupContent;
    use crate::direction::Direction;
    use crate::drawable::{DrawOutcome, HitTarget, OverlayPane};
    use crate::placer::PopupGeometry;
    use crate::registry::OpenOverlayRegistry;
    use foundation::ids::OverlayId;
    use foundation::math::LatLng;
    use foundation::screen::{
        Projector, ScreenOffset, ScreenPoint, ScreenRect, Segment,
    };
    use scene::cluster::ClusterEngine;
    use scene::pin::{Group, Pin};
    use std::collections::BTreeMap;

    /// Flat projection: one degree is 1000 px, shifted by a pan offset.
    struct FakePane {
        pan: ScreenOffset,
        projection_ready: bool,
        overlays: BTreeMap<OverlayId, (PopupContent, Option<(ScreenRect, Segment)>)>,
    }

    impl FakePane {
        fn new() -> Self {
            Self {
                pan: ScreenOffset::ZERO,
                projection_ready: true,
                overlays: BTreeMap::new(),
            }
        }

        fn rect(&self, id: OverlayId) -> ScreenRect {
            self.overlays[&id].1.expect("positioned").0
        }
    }

    impl Projector for FakePane {
        fn project(&self, p: LatLng) -> Option<ScreenPoint> {
            self.projection_ready.then(|| {
                ScreenPoint::new(p.lng * 1000.0 + self.pan.dx, -p.lat * 1000.0 + self.pan.dy)
            })
        }
    }

    impl OverlayPane for FakePane {
        fn insert_overlay(&mut self, id: OverlayId, content: &PopupContent) {
            self.overlays.insert(id, (content.clone(), None));
        }

        fn replace_content(&mut self, id: OverlayId, content: &PopupContent) {
            if let Some(entry) = self.overlays.get_mut(&id) {
                entry.0 = content.clone();
            }
        }

        fn position_overlay(&mut self, id: OverlayId, rect: ScreenRect, connector: Segment) {
            if let Some(entry) = self.overlays.get_mut(&id) {
                entry.1 = Some((rect, connector));
            }
        }

        fn remove_overlay(&mut self, id: OverlayId) {
            self.overlays.remove(&id);
        }
    }

    fn groups() -> Vec<Group> {
        let pins: Vec<Pin> = (0..5)
            .map(|i| Pin {
                name: format!("pin {i}"),
                address: format!("{i} Main St"),
                note: String::new(),
                lat: -0.1 * i as f64,
                lng: 0.2 * i as f64,
            })
            .collect();
        ClusterEngine::default().cluster(&pins)
    }

    fn controller(group: Group) -> OverlayController {
        OverlayController::new(group, PopupGeometry::standard())
    }

    #[test]
    fn opens_detailed_above_the_anchor() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(1));

        let id = c.open(&mut reg, &mut pane);
        assert_eq!(c.state(), OverlayState::Detailed);
        assert_eq!(c.session().map(|s| s.direction()), Some(Direction::Top));

        // Anchor (lat -0.1, lng 0.2) projects to (200, 100).
        let r = pane.rect(id);
        assert_eq!(r.left, 200.0 - 110.0);
        assert_eq!(r.top, 100.0 - 250.0 - 80.0);
        assert!(reg.contains(id));
    }

    #[test]
    fn sequential_opens_rotate_directions() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut controllers: Vec<OverlayController> =
            groups().into_iter().map(controller).collect();

        let dirs: Vec<Direction> = controllers
            .iter_mut()
            .map(|c| {
                c.open(&mut reg, &mut pane);
                c.session().map(|s| s.direction()).expect("open")
            })
            .collect();
        assert_eq!(
            dirs,
            vec![
                Direction::Top,
                Direction::Bottom,
                Direction::Right,
                Direction::Left,
                Direction::Top,
            ]
        );
    }

    #[test]
    fn toggling_twice_restores_content_and_position() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(0));
        let id = c.open(&mut reg, &mut pane);

        c.pointer_down(ScreenPoint::new(10.0, -200.0), HitTarget::Body);
        c.pointer_move(ScreenPoint::new(40.0, -180.0), &mut pane);
        c.pointer_up(&pane);

        let before_content = pane.overlays[&id].0.clone();
        let before_rect = pane.rect(id);
        let before_offset = c.session().and_then(|s| s.manual_offset());

        assert!(c.toggle(&mut pane));
        assert_eq!(c.state(), OverlayState::Minimized);
        assert_eq!(c.overlay_id(), Some(id));
        assert!(pane.overlays[&id].0.minimized);
        // Shorter footprint, so the top-anchored popup moves down.
        assert!(pane.rect(id).top > before_rect.top);

        assert!(c.toggle(&mut pane));
        assert_eq!(c.state(), OverlayState::Detailed);
        assert_eq!(c.overlay_id(), Some(id));
        assert_eq!(pane.overlays[&id].0, before_content);
        assert_eq!(pane.rect(id), before_rect);
        assert_eq!(c.session().and_then(|s| s.manual_offset()), before_offset);
    }

    #[test]
    fn drag_offset_survives_a_pan() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(2));
        let id = c.open(&mut reg, &mut pane);
        let start = pane.rect(id);

        assert!(c.pointer_down(ScreenPoint::new(100.0, 100.0), HitTarget::Body));
        assert!(c.pointer_move(ScreenPoint::new(110.0, 95.0), &mut pane));
        assert!(c.pointer_move(ScreenPoint::new(130.0, 85.0), &mut pane));
        assert_eq!(pane.rect(id), start.translate(ScreenOffset::new(30.0, -15.0)));
        assert!(c.pointer_up(&pane));
        assert_eq!(
            c.session().and_then(|s| s.manual_offset()),
            Some(ScreenOffset::new(30.0, -15.0))
        );

        pane.pan = ScreenOffset::new(-250.0, 60.0);
        assert_eq!(c.redraw(&mut pane), DrawOutcome::Drawn);

        let session = c.session().expect("open");
        let anchor = pane.project(session.anchor()).expect("projection");
        let expected = session
            .default_rect(anchor)
            .translate(ScreenOffset::new(30.0, -15.0));
        assert_eq!(pane.rect(id), expected);
        assert_eq!(c.overlay_id(), Some(id));
    }

    #[test]
    fn connector_follows_every_drag_move() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(0));
        let id = c.open(&mut reg, &mut pane);

        c.pointer_down(ScreenPoint::new(0.0, 0.0), HitTarget::Body);
        c.pointer_move(ScreenPoint::new(50.0, 0.0), &mut pane);
        let (rect, line) = pane.overlays[&id].1.expect("positioned");
        assert_eq!(line.from, ScreenPoint::new(0.0, 0.0));
        assert_eq!(line.to, rect.center());
    }

    #[test]
    fn controls_and_links_do_not_start_a_drag() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(0));
        c.open(&mut reg, &mut pane);

        for target in [HitTarget::CloseControl, HitTarget::ToggleControl, HitTarget::Link] {
            assert!(!c.pointer_down(ScreenPoint::new(0.0, 0.0), target));
        }
        assert!(!c.pointer_move(ScreenPoint::new(5.0, 5.0), &mut pane));
        assert!(!c.is_dragging());
    }

    #[test]
    fn missing_projection_skips_without_losing_state() {
        let mut pane = FakePane::new();
        pane.projection_ready = false;
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(0));
        let id = c.open(&mut reg, &mut pane);

        assert!(pane.overlays[&id].1.is_none());
        assert_eq!(c.redraw(&mut pane), DrawOutcome::Skipped);

        pane.projection_ready = true;
        assert_eq!(c.redraw(&mut pane), DrawOutcome::Drawn);
        assert!(pane.overlays[&id].1.is_some());
    }

    #[test]
    fn reopening_recreates_in_the_same_form() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(0));
        let first = c.open(&mut reg, &mut pane);
        c.toggle(&mut pane);

        let second = c.open(&mut reg, &mut pane);
        assert_ne!(first, second);
        assert!(!pane.overlays.contains_key(&first));
        assert_eq!(c.state(), OverlayState::Minimized);
        assert_eq!(reg.iter().collect::<Vec<_>>(), vec![second]);
        // Only one popup open, so it goes back on top.
        assert_eq!(c.session().map(|s| s.direction()), Some(Direction::Top));
        assert_eq!(c.session().and_then(|s| s.manual_offset()), None);
    }

    #[test]
    fn close_removes_from_surface_and_registry() {
        let mut pane = FakePane::new();
        let mut reg = OpenOverlayRegistry::new();
        let mut c = controller(groups().remove(0));
        let id = c.open(&mut reg, &mut pane);

        assert!(c.close(&mut reg, &mut pane));
        assert_eq!(c.state(), OverlayState::Closed);
        assert!(pane.overlays.is_empty());
        assert!(!reg.contains(id));
        assert!(!c.close(&mut reg, &mut pane));
        assert!(!c.toggle(&mut pane));
        assert_eq!(c.redraw(&mut pane), DrawOutcome::Idle);
    }
}
