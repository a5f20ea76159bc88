//! Spherical Web Mercator in "world pixel" space.
//!
//! At zoom `z` the whole world spans `TILE_SIZE_PX * 2^z` pixels on each
//! axis, origin at the north-west corner.

use super::LatLng;

/// Edge length of one map tile (pixels).
pub const TILE_SIZE_PX: f64 = 256.0;

/// Latitudes are clamped so the projection stays finite near the poles.
const MAX_SIN_LAT: f64 = 0.9999;

/// Size of the world in pixels at `zoom`.
pub fn world_size_px(zoom: f64) -> f64 {
    TILE_SIZE_PX * zoom.exp2()
}

/// Projects a coordinate to world pixels at `zoom`.
pub fn to_world_px(position: LatLng, zoom: f64) -> [f64; 2] {
    let size = world_size_px(zoom);
    let x = (position.lng + 180.0) / 360.0 * size;
    let sin_lat = position.lat.to_radians().sin().clamp(-MAX_SIN_LAT, MAX_SIN_LAT);
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * std::f64::consts::PI)) * size;
    [x, y]
}

/// Inverse of [`to_world_px`].
pub fn from_world_px(px: [f64; 2], zoom: f64) -> LatLng {
    let size = world_size_px(zoom);
    let lng = px[0] / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * px[1] / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}
