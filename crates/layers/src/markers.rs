use foundation::math::LatLng;
use scene::pin::Group;
use serde::Serialize;

use crate::labels::{MarkerLabel, marker_label, marker_title};
use crate::layer::{Layer, LayerId};

/// Everything a rendering surface needs to place one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub label: MarkerLabel,
    pub title: String,
    /// Drop-in animation on first placement.
    pub animate_drop: bool,
}

impl MarkerSpec {
    pub fn for_group(group: &Group) -> Self {
        Self {
            position: group.anchor(),
            label: marker_label(group),
            title: marker_title(group),
            animate_drop: true,
        }
    }
}

/// One marker per display group, in group order.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    id: LayerId,
    specs: Vec<MarkerSpec>,
}

impl MarkerLayer {
    pub fn from_groups(id: u64, groups: &[Group]) -> Self {
        Self {
            id: LayerId(id),
            specs: groups.iter().map(MarkerSpec::for_group).collect(),
        }
    }

    pub fn specs(&self) -> &[MarkerSpec] {
        &self.specs
    }
}

impl Layer for MarkerLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn len(&self) -> usize {
        self.specs.len()
    }
}
