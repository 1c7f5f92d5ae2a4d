//! Per-segment geometry reduction.
//!
//! Raw router geometry may overshoot or undershoot the stops a segment runs
//! between. The resolved path keeps the interior shape but is cut at the
//! points nearest the origin and destination, and re-anchored onto them when
//! the cut still lands too far away.

use tracing::debug;

use crate::config::EngineConfig;
use crate::haversine::distance_meters;
use crate::model::{Coordinate, RouteSegment};
use crate::polyline::Polyline;

/// Displayable path for one segment.
///
/// Falls back to the valid subset of `[origin, destination]` when the
/// geometry has fewer than two usable points.
pub fn resolve_segment_path(segment: &RouteSegment, config: &EngineConfig) -> Vec<Coordinate> {
    let safe_geom = Polyline::valid_only(segment.geometry.as_deref().unwrap_or_default());
    let origin = segment.origin.coordinates;
    let destination = segment.destination.coordinates;
    let fallback: Vec<Coordinate> = [origin, destination]
        .into_iter()
        .filter(Coordinate::is_valid)
        .collect();

    let path = if safe_geom.len() >= 2 && origin.is_valid() && destination.is_valid() {
        anchor_to_endpoints(&safe_geom, origin, destination, config.anchor_tolerance_m)
    } else {
        safe_geom.into_points()
    };

    if path.len() >= 2 {
        path
    } else {
        debug!(segment = %segment.id, "segment geometry unusable, drawing raw endpoints");
        fallback
    }
}

fn anchor_to_endpoints(
    geom: &Polyline,
    origin: Coordinate,
    destination: Coordinate,
    tolerance_m: f64,
) -> Vec<Coordinate> {
    let points = geom.points();
    let (Some(start_idx), Some(end_idx)) = (
        geom.nearest_index(origin),
        geom.nearest_index_from_end(destination),
    ) else {
        return points.to_vec();
    };

    let mut path: Vec<Coordinate> = if start_idx <= end_idx {
        points[start_idx..=end_idx].to_vec()
    } else {
        // Stored back-to-front.
        points[end_idx..=start_idx].iter().rev().copied().collect()
    };

    if path.first().is_some_and(|first| distance_meters(*first, origin) > tolerance_m) {
        path.insert(0, origin);
    }
    if path.last().is_some_and(|last| distance_meters(*last, destination) > tolerance_m) {
        path.push(destination);
    }
    path
}

/// Resolves every segment, index-aligned with the input.
pub fn resolve_all(segments: &[RouteSegment], config: &EngineConfig) -> Vec<Vec<Coordinate>> {
    segments
        .iter()
        .map(|segment| resolve_segment_path(segment, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, TransportType};

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    fn bus(origin: Coordinate, destination: Coordinate) -> RouteSegment {
        RouteSegment::new(
            "bus-1",
            TransportType::new("BUS"),
            Location::new("Origin", origin),
            Location::new("Destination", destination),
        )
    }

    #[test]
    fn test_missing_geometry_uses_endpoints() {
        let seg = bus(c(14.60, 121.00), c(14.61, 121.00));
        let path = resolve_segment_path(&seg, &EngineConfig::default());
        assert_eq!(path, vec![c(14.60, 121.00), c(14.61, 121.00)]);
    }

    #[test]
    fn test_geometry_matching_endpoints_is_untouched() {
        let geom = vec![c(14.600, 121.0), c(14.602, 121.001), c(14.605, 121.001), c(14.610, 121.0)];
        let seg = bus(c(14.600, 121.0), c(14.610, 121.0)).with_geometry(geom.clone());
        assert_eq!(resolve_segment_path(&seg, &EngineConfig::default()), geom);
    }

    #[test]
    fn test_overshoot_is_cut_at_nearest_points() {
        // Geometry starts ~220 m before the origin and runs ~220 m past the destination.
        let geom = vec![
            c(14.598, 121.0),
            c(14.600, 121.0),
            c(14.605, 121.0),
            c(14.610, 121.0),
            c(14.612, 121.0),
        ];
        let seg = bus(c(14.600, 121.0), c(14.610, 121.0)).with_geometry(geom);
        let path = resolve_segment_path(&seg, &EngineConfig::default());
        assert_eq!(path, vec![c(14.600, 121.0), c(14.605, 121.0), c(14.610, 121.0)]);
    }

    #[test]
    fn test_back_to_front_geometry_is_reversed() {
        let geom = vec![c(14.610, 121.0), c(14.605, 121.0), c(14.600, 121.0)];
        let seg = bus(c(14.600, 121.0), c(14.610, 121.0)).with_geometry(geom);
        let path = resolve_segment_path(&seg, &EngineConfig::default());
        assert_eq!(path, vec![c(14.600, 121.0), c(14.605, 121.0), c(14.610, 121.0)]);
    }

    #[test]
    fn test_far_endpoints_are_anchored() {
        // Stops sit ~55 m off the routed line at both ends.
        let geom = vec![c(14.600, 121.0005), c(14.605, 121.0005), c(14.610, 121.0005)];
        let origin = c(14.600, 121.0);
        let destination = c(14.610, 121.0);
        let seg = bus(origin, destination).with_geometry(geom);
        let path = resolve_segment_path(&seg, &EngineConfig::default());
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], origin);
        assert_eq!(path[4], destination);
    }

    #[test]
    fn test_near_endpoints_are_not_anchored() {
        // ~11 m offset stays within the anchor tolerance.
        let geom = vec![c(14.6001, 121.0), c(14.605, 121.0), c(14.6099, 121.0)];
        let seg = bus(c(14.600, 121.0), c(14.610, 121.0)).with_geometry(geom.clone());
        assert_eq!(resolve_segment_path(&seg, &EngineConfig::default()), geom);
    }

    #[test]
    fn test_invalid_geometry_points_are_dropped() {
        let geom = vec![c(14.600, 121.0), c(0.0, 0.0), c(f64::NAN, 121.0), c(14.610, 121.0)];
        let seg = bus(c(14.600, 121.0), c(14.610, 121.0)).with_geometry(geom);
        let path = resolve_segment_path(&seg, &EngineConfig::default());
        assert_eq!(path, vec![c(14.600, 121.0), c(14.610, 121.0)]);
    }

    #[test]
    fn test_single_point_geometry_falls_back() {
        let seg = bus(c(14.600, 121.0), c(14.610, 121.0)).with_geometry(vec![c(14.605, 121.0)]);
        let path = resolve_segment_path(&seg, &EngineConfig::default());
        assert_eq!(path, vec![c(14.600, 121.0), c(14.610, 121.0)]);
    }

    #[test]
    fn test_invalid_origin_keeps_raw_geometry() {
        let geom = vec![c(14.598, 121.0), c(14.605, 121.0), c(14.612, 121.0)];
        let seg = bus(c(0.0, 0.0), c(14.610, 121.0)).with_geometry(geom.clone());
        assert_eq!(resolve_segment_path(&seg, &EngineConfig::default()), geom);
    }

    #[test]
    fn test_nothing_valid_gives_partial_fallback() {
        let seg = bus(c(0.0, 0.0), c(14.610, 121.0));
        assert_eq!(resolve_segment_path(&seg, &EngineConfig::default()), vec![c(14.610, 121.0)]);
    }
}
