use foundation::ids::PinIndex;
use foundation::math::LatLng;
use serde::{Deserialize, Serialize};

/// One geocoded location of a loaded map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub note: String,
    pub lat: f64,
    pub lng: f64,
}

impl Pin {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMember {
    pub index: PinIndex,
    pub pin: Pin,
}

/// Pins rendered together as one marker.
///
/// Invariant: never empty. The first member is the seed and its coordinate
/// is the group's anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    members: Vec<GroupMember>,
}

impl Group {
    pub(crate) fn seeded(seed: GroupMember) -> Self {
        Self {
            members: vec![seed],
        }
    }

    pub(crate) fn push(&mut self, member: GroupMember) {
        self.members.push(member);
    }

    pub fn seed(&self) -> &GroupMember {
        &self.members[0]
    }

    pub fn anchor(&self) -> LatLng {
        self.seed().pin.position()
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = PinIndex> + '_ {
        self.members.iter().map(|m| m.index)
    }
}
