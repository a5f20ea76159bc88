use catalog::{MapPin, MapService};
use scene::camera::CameraPlan;
use scene::pin::Pin;
use surface::map_surface::MapSurface;
use tracing::warn;

use crate::coordinator::MapSessionCoordinator;
use crate::error::MapError;
use crate::loader::{SdkGate, SdkLoader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready,
    Failed(String),
}

impl ViewState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready)
    }
}

pub fn pin_from_record(p: MapPin) -> Pin {
    Pin {
        name: p.name,
        address: p.address,
        note: p.note,
        lat: p.lat,
        lng: p.lng,
    }
}

/// Opens a shared map: SDK, then the stored record, then the coordinator.
/// The fetch is not retried.
pub async fn try_load_view<S, L, M>(
    gate: &SdkGate,
    loader: &L,
    service: &M,
    map_id: &str,
    coordinator: &mut MapSessionCoordinator<S>,
) -> Result<CameraPlan, MapError>
where
    S: MapSurface,
    L: SdkLoader,
    M: MapService,
{
    gate.ensure_loaded(loader).await?;
    let record = service.fetch_map(map_id).await?;
    let pins: Vec<Pin> = record.pins.into_iter().map(pin_from_record).collect();
    coordinator.load_map(&record.title, &pins)
}

/// [`try_load_view`] folded into the state a view renders.
pub async fn load_view<S, L, M>(
    gate: &SdkGate,
    loader: &L,
    service: &M,
    map_id: &str,
    coordinator: &mut MapSessionCoordinator<S>,
) -> ViewState
where
    S: MapSurface,
    L: SdkLoader,
    M: MapService,
{
    match try_load_view(gate, loader, service, map_id, coordinator).await {
        Ok(_) => ViewState::Ready,
        Err(err) => {
            warn!(%map_id, error = %err, "map view failed");
            ViewState::Failed(err.to_string())
        }
    }
}
