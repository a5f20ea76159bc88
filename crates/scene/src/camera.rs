//! Initial camera selection for a loaded map.

use foundation::bounds::LatLngBounds;
use foundation::math::{LatLng, mean_position};
use foundation::screen::Padding;
use serde::Serialize;

use crate::pin::Group;

/// Zoom used when the map has a single marker.
pub const SINGLE_POINT_ZOOM: u8 = 14;

/// The settle step never zooms out past this level.
pub const MIN_SETTLED_ZOOM: u8 = 1;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportConfig {
    pub single_point_zoom: u8,
    /// Top inset reserves room for the header and print margin.
    pub fit_padding: Padding,
    pub min_settled_zoom: u8,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            single_point_zoom: SINGLE_POINT_ZOOM,
            fit_padding: Padding {
                top: 80.0,
                right: 50.0,
                bottom: 50.0,
                left: 50.0,
            },
            min_settled_zoom: MIN_SETTLED_ZOOM,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraPlan {
    /// One marker: center on it at a fixed zoom.
    Center { center: LatLng, zoom: u8 },
    /// Several markers: fit their anchors, then zoom out one step once the
    /// surface reports the fit has settled.
    ///
    /// `initial_center` (mean of every pin) is only the camera target while
    /// the fit is pending.
    FitBounds {
        bounds: LatLngBounds,
        padding: Padding,
        initial_center: LatLng,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ViewportPlanner {
    pub config: ViewportConfig,
}

impl ViewportPlanner {
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    /// Returns `None` when there is nothing to frame.
    pub fn plan(&self, groups: &[Group]) -> Option<CameraPlan> {
        match groups {
            [] => None,
            [only] => Some(CameraPlan::Center {
                center: only.anchor(),
                zoom: self.config.single_point_zoom,
            }),
            _ => {
                let bounds = LatLngBounds::from_points(groups.iter().map(Group::anchor))?;
                let initial_center = mean_position(
                    groups
                        .iter()
                        .flat_map(|g| g.members().iter().map(|m| m.pin.position())),
                )?;
                Some(CameraPlan::FitBounds {
                    bounds,
                    padding: self.config.fit_padding,
                    initial_center,
                })
            }
        }
    }

    /// Zoom to apply once a bounds fit has settled at `fitted_zoom`.
    pub fn settled_zoom(&self, fitted_zoom: u8) -> u8 {
        if fitted_zoom > self.config.min_settled_zoom {
            fitted_zoom - 1
        } else {
            fitted_zoom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraPlan, SINGLE_POINT_ZOOM, ViewportPlanner};
    use crate::cluster::ClusterEngine;
    use crate::pin::Pin;
    use foundation::math::LatLng;

    fn pin(lat: f64, lng: f64) -> Pin {
        Pin {
            name: "p".into(),
            address: "addr".into(),
            note: String::new(),
            lat,
            lng,
        }
    }

    #[test]
    fn single_pin_centers_at_fixed_zoom() {
        let groups = ClusterEngine::default().cluster(&[pin(35.68, 139.76)]);
        let plan = ViewportPlanner::default().plan(&groups);
        assert_eq!(
            plan,
            Some(CameraPlan::Center {
                center: LatLng::new(35.68, 139.76),
                zoom: SINGLE_POINT_ZOOM,
            })
        );
    }

    #[test]
    fn coincident_pins_count_as_one_point() {
        let groups =
            ClusterEngine::default().cluster(&[pin(35.68, 139.76), pin(35.68, 139.76)]);
        assert_eq!(groups.len(), 1);
        assert!(matches!(
            ViewportPlanner::default().plan(&groups),
            Some(CameraPlan::Center { zoom: 14, .. })
        ));
    }

    #[test]
    fn several_groups_fit_bounds_with_header_padding() {
        let groups = ClusterEngine::default().cluster(&[
            pin(35.0, 139.0),
            pin(35.0, 139.00001),
            pin(36.0, 140.0),
        ]);
        let Some(CameraPlan::FitBounds {
            bounds,
            padding,
            initial_center,
        }) = ViewportPlanner::default().plan(&groups)
        else {
            panic!("expected a bounds fit");
        };

        assert_eq!(bounds.south_west, LatLng::new(35.0, 139.0));
        assert_eq!(bounds.north_east, LatLng::new(36.0, 140.0));
        assert_eq!(padding.top, 80.0);
        assert_eq!(padding.bottom, 50.0);
        assert_eq!(padding.left, 50.0);
        assert_eq!(padding.right, 50.0);
        // Mean over all three pins, not just the two anchors.
        assert!((initial_center.lng - (139.0 + 139.00001 + 140.0) / 3.0).abs() < 1e-12);
        assert!((initial_center.lat - 106.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_groups_have_no_plan() {
        assert_eq!(ViewportPlanner::default().plan(&[]), None);
    }

    #[test]
    fn settle_zooms_out_once_with_floor() {
        let planner = ViewportPlanner::default();
        assert_eq!(planner.settled_zoom(12), 11);
        assert_eq!(planner.settled_zoom(2), 1);
        assert_eq!(planner.settled_zoom(1), 1);
        assert_eq!(planner.settled_zoom(0), 0);
    }
}
