//! Test fixtures for route-overlay.
//!
//! Provides realistic test data including:
//! - Real Metro Manila stops and stations (from OpenStreetMap)
//! - Builders for segments and routes

pub mod manila_locations;

pub use manila_locations::*;

use route_overlay::{Coordinate, Location, RouteSegment, TransportType};

/// Segment between two named stops with no geometry.
pub fn leg(id: &str, mode: &str, from: &Stop, to: &Stop) -> RouteSegment {
    RouteSegment::new(id, TransportType::new(mode), from.location(), to.location())
}

/// Segment between raw coordinates.
pub fn raw_leg(id: &str, mode: &str, from: Coordinate, to: Coordinate) -> RouteSegment {
    RouteSegment::new(
        id,
        TransportType::new(mode),
        Location::new(format!("{id} start"), from),
        Location::new(format!("{id} end"), to),
    )
}

/// Straight polyline from `from` to `to` with `n` evenly spaced points.
pub fn straight(from: Coordinate, to: Coordinate, n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            Coordinate::new(
                from.latitude + (to.latitude - from.latitude) * t,
                from.longitude + (to.longitude - from.longitude) * t,
            )
        })
        .collect()
}
