//! JSON layout of a loaded map view, as printed by the CLI.

use std::collections::BTreeMap;

use foundation::ids::{MarkerId, OverlayId};
use foundation::math::LatLng;
use foundation::screen::{Projector, ScreenPoint, ScreenRect, ScreenSize, Segment};
use overlay::content::PopupContent;
use overlay::controller::OverlayState;
use overlay::direction::Direction;
use scene::camera::CameraPlan;
use serde::Serialize;
use session::coordinator::MapSessionCoordinator;
use surface::headless::MercatorSurface;
use surface::map_surface::MapSurface;

#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub title: String,
    pub viewport: ScreenSize,
    pub plan: CameraPlan,
    pub camera: CameraReport,
    pub markers: Vec<MarkerReport>,
    pub popups: Vec<PopupReport>,
    pub counters: BTreeMap<&'static str, u64>,
}

#[derive(Debug, Serialize)]
pub struct CameraReport {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Serialize)]
pub struct MarkerReport {
    pub id: MarkerId,
    pub label: String,
    pub title: String,
    pub position: LatLng,
    pub screen: Option<ScreenPoint>,
}

#[derive(Debug, Serialize)]
pub struct PopupReport {
    pub overlay: OverlayId,
    pub marker: MarkerId,
    pub direction: Direction,
    pub state: OverlayState,
    pub rect: Option<ScreenRect>,
    pub connector: Option<Segment>,
    pub content: PopupContent,
}

impl LayoutReport {
    pub fn build(coordinator: &MapSessionCoordinator<MercatorSurface>, plan: CameraPlan) -> Self {
        let surface = coordinator.surface();

        let markers = surface
            .markers()
            .iter()
            .map(|m| MarkerReport {
                id: m.id,
                label: m.spec.label.text.clone(),
                title: m.spec.title.clone(),
                position: m.spec.position,
                screen: surface.project(m.spec.position),
            })
            .collect();

        let popups = coordinator
            .markers()
            .iter()
            .filter_map(|slot| {
                let session = slot.controller.session()?;
                let element = surface.overlay(session.id())?;
                Some(PopupReport {
                    overlay: session.id(),
                    marker: slot.id,
                    direction: session.direction(),
                    state: slot.controller.state(),
                    rect: element.rect,
                    connector: element.connector,
                    content: element.content.clone(),
                })
            })
            .collect();

        Self {
            title: surface.title().to_string(),
            viewport: surface.viewport(),
            plan,
            camera: CameraReport {
                center: surface.center(),
                zoom: surface.zoom(),
            },
            markers,
            popups,
            counters: coordinator.metrics().snapshot().counters.into_iter().collect(),
        }
    }
}
