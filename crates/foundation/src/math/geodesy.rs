use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances (meters).
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Great-circle distance between two coordinates (haversine).
///
/// NaN inputs propagate to a NaN result.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (d_lat * 0.5).sin();
    let sin_lng = (d_lng * 0.5).sin();
    let h = sin_lat * sin_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_lng * sin_lng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_MEAN_RADIUS_M * c
}

/// Arithmetic mean of a set of coordinates, or `None` when empty.
pub fn mean_position<I>(points: I) -> Option<LatLng>
where
    I: IntoIterator<Item = LatLng>,
{
    let mut lat = 0.0;
    let mut lng = 0.0;
    let mut count = 0usize;
    for p in points {
        lat += p.lat;
        lng += p.lng;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(LatLng::new(lat / count as f64, lng / count as f64))
}

#[cfg(test)]
mod tests {
    use super::{LatLng, distance_meters, mean_position};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zero_distance_for_identical_points() {
        let p = LatLng::new(35.681, 139.767);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_on_equator() {
        let d = distance_meters(LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0));
        assert_close(d, 111_194.93, 0.5);
    }

    #[test]
    fn small_offsets_match_expected_meters() {
        let origin = LatLng::new(0.0, 0.0);
        assert_close(distance_meters(origin, LatLng::new(0.0, 0.00005)), 5.56, 0.01);
        assert_close(distance_meters(origin, LatLng::new(0.0, 0.0002)), 22.24, 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LatLng::new(35.0, 139.0);
        let b = LatLng::new(34.7, 135.5);
        assert_close(distance_meters(a, b), distance_meters(b, a), 1e-6);
    }

    #[test]
    fn nan_propagates() {
        let d = distance_meters(LatLng::new(f64::NAN, 0.0), LatLng::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    #[test]
    fn mean_of_points() {
        let m = mean_position([LatLng::new(0.0, 0.0), LatLng::new(2.0, 4.0)]);
        assert_eq!(m, Some(LatLng::new(1.0, 2.0)));
        assert_eq!(mean_position(Vec::<LatLng>::new()), None);
    }
}
