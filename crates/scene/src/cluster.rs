//! Seed-anchored proximity grouping.
//!
//! Pins are walked in input order. Each unprocessed pin seeds a new group
//! and pulls in every unprocessed pin within the threshold of the *seed*.
//! Distances to other members are never consulted, so this is not
//! transitive clustering: a pin just past the threshold from the
//! seed stays out even when it sits next to another member.

use foundation::ids::PinIndex;
use foundation::math::distance_meters;
use tracing::debug;

use crate::pin::{Group, GroupMember, Pin};

/// Pins closer than this to a seed share its marker (meters, inclusive).
pub const DEFAULT_CLUSTER_THRESHOLD_M: f64 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClusterConfig {
    pub threshold_m: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            threshold_m: DEFAULT_CLUSTER_THRESHOLD_M,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    pub config: ClusterConfig,
}

impl ClusterEngine {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Groups `pins` into display groups. O(n²) in the pin count.
    ///
    /// Ordering contract:
    /// - Groups appear in the input order of their seeds.
    /// - Members within a group appear in input order after the seed.
    pub fn cluster(&self, pins: &[Pin]) -> Vec<Group> {
        let mut processed = vec![false; pins.len()];
        let mut groups = Vec::new();

        for (seed_idx, seed) in pins.iter().enumerate() {
            if processed[seed_idx] {
                continue;
            }
            processed[seed_idx] = true;

            let mut group = Group::seeded(GroupMember {
                index: PinIndex(seed_idx),
                pin: seed.clone(),
            });

            for (other_idx, other) in pins.iter().enumerate() {
                if processed[other_idx] {
                    continue;
                }
                let d = distance_meters(seed.position(), other.position());
                if d <= self.config.threshold_m {
                    processed[other_idx] = true;
                    group.push(GroupMember {
                        index: PinIndex(other_idx),
                        pin: other.clone(),
                    });
                }
            }

            groups.push(group);
        }

        debug!(
            pins = pins.len(),
            groups = groups.len(),
            threshold_m = self.config.threshold_m,
            "clustered pins"
        );
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::{ClusterConfig, ClusterEngine};
    use crate::pin::{Group, Pin};
    use foundation::math::{LatLng, distance_meters};

    fn pin(name: &str, lat: f64, lng: f64) -> Pin {
        Pin {
            name: name.to_string(),
            address: format!("{name} street"),
            note: String::new(),
            lat,
            lng,
        }
    }

    fn index_sets(groups: &[Group]) -> Vec<Vec<usize>> {
        groups
            .iter()
            .map(|g| g.indices().map(|i| i.0).collect())
            .collect()
    }

    #[test]
    fn merges_near_pins_and_keeps_far_ones_apart() {
        let pins = vec![
            pin("a", 0.0, 0.0),
            pin("b", 0.0, 0.00005),
            pin("c", 0.0, 0.0002),
        ];
        let groups = ClusterEngine::default().cluster(&pins);
        assert_eq!(index_sets(&groups), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn groups_partition_the_input() {
        let mut pins = Vec::new();
        for i in 0..40 {
            // Pairs of pins 3 m apart, each pair 1 km from the next.
            let base = i as f64 * 0.01;
            pins.push(pin("p", base, 0.0));
            pins.push(pin("q", base, 0.000027));
        }
        let groups = ClusterEngine::default().cluster(&pins);

        assert!(groups.iter().all(|g| !g.is_empty()));
        let mut seen: Vec<usize> = groups.iter().flat_map(|g| g.indices().map(|i| i.0)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..pins.len()).collect::<Vec<_>>());
        assert_eq!(groups.len(), 40);
    }

    #[test]
    fn membership_is_measured_against_the_seed_only() {
        // b is 8.9 m from a; c is 10.5 m from a but only 1.6 m from b.
        let pins = vec![
            pin("a", 0.0, 0.0),
            pin("b", 0.0, 0.00008),
            pin("c", 0.0, 0.0000944),
        ];
        let a = pins[0].position();
        assert!(distance_meters(a, pins[2].position()) > 10.0);
        assert!(distance_meters(pins[1].position(), pins[2].position()) < 2.0);

        let groups = ClusterEngine::default().cluster(&pins);
        assert_eq!(index_sets(&groups), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn members_need_not_be_near_each_other() {
        // b and c are each 8.9 m from the seed but 17.8 m apart.
        let pins = vec![
            pin("a", 0.0, 0.0),
            pin("b", 0.0, -0.00008),
            pin("c", 0.0, 0.00008),
        ];
        let groups = ClusterEngine::default().cluster(&pins);
        assert_eq!(index_sets(&groups), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn input_order_changes_grouping() {
        let a = pin("a", 0.0, 0.0);
        let b = pin("b", 0.0, 0.00008);
        let c = pin("c", 0.0, 0.00016);

        let forward = ClusterEngine::default().cluster(&[a.clone(), b.clone(), c.clone()]);
        assert_eq!(index_sets(&forward), vec![vec![0, 1], vec![2]]);

        // With b first, both neighbours are within reach of the seed.
        let middle_first = ClusterEngine::default().cluster(&[b, a, c]);
        assert_eq!(index_sets(&middle_first), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn next_group_is_seeded_by_first_unprocessed_pin() {
        // a seeds alone; b seeds the second group and picks up c.
        let pins = vec![
            pin("a", 0.0, 0.0),
            pin("b", 0.0, 0.01),
            pin("c", 0.0, 0.01),
        ];
        let groups = ClusterEngine::default().cluster(&pins);
        assert_eq!(index_sets(&groups), vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let a = pin("a", 35.0, 139.0);
        let b = pin("b", 35.0, 139.0001);
        let exact = distance_meters(LatLng::new(a.lat, a.lng), LatLng::new(b.lat, b.lng));

        let engine = ClusterEngine::new(ClusterConfig { threshold_m: exact });
        assert_eq!(engine.cluster(&[a.clone(), b.clone()]).len(), 1);

        let tighter = ClusterEngine::new(ClusterConfig {
            threshold_m: exact - 1e-6,
        });
        assert_eq!(tighter.cluster(&[a, b]).len(), 2);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(ClusterEngine::default().cluster(&[]).is_empty());
    }
}
