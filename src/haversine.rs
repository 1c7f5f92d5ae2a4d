//! Great-circle distance between coordinates.
//!
//! Every metric threshold in the engine is measured with this function, so
//! the radius constant must stay in sync with the tolerances in
//! [`crate::config`].

use crate::model::Coordinate;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn distance_meters(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1.0 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Sum of consecutive haversine distances. Zero for fewer than two points.
pub fn polyline_length_meters(coords: &[Coordinate]) -> f64 {
    coords
        .windows(2)
        .map(|pair| distance_meters(pair[0], pair[1]))
        .sum()
}
