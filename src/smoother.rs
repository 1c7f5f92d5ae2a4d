//! Detour trimming between adjacent ride segments.
//!
//! Stops are often offset from the routed road centerline, so a ride's path
//! can run past the next ride's boarding point and loop back. When the path
//! passes close to that boarding point and what follows is much longer than
//! the straight hop, the path is cut at the closest approach and a dashed
//! connector bridges the rest.

use tracing::{debug, trace};

use crate::config::{DetourThresholds, EngineConfig};
use crate::haversine::{distance_meters, polyline_length_meters};
use crate::model::{Coordinate, RouteSegment};
use crate::polyline::Polyline;

/// Result of a successful detour test on one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetourTrim {
    /// Last index kept in the path.
    pub keep_through: usize,
    /// Straight line from the cut point to the target.
    pub connector: [Coordinate; 2],
}

/// Closest-approach detour test of `path` against `target`.
///
/// Returns `None` when the path is too short, never comes within
/// `max_approach_m` of the target, or its tail is ordinary road curvature.
pub fn find_detour(
    path: &[Coordinate],
    target: Coordinate,
    min_points: usize,
    thresholds: &DetourThresholds,
) -> Option<DetourTrim> {
    if path.len() < min_points {
        return None;
    }
    let approach = Polyline::new(path.to_vec()).closest_approach(target)?;
    if approach.distance_m > thresholds.max_approach_m {
        trace!(distance_m = approach.distance_m, "closest approach too far for a detour");
        return None;
    }

    let cut = path[approach.index];
    let tail_m = polyline_length_meters(&path[approach.index..]);
    let direct_m = distance_meters(cut, target);
    if !thresholds.is_detour(direct_m, tail_m) {
        trace!(tail_m, direct_m, "tail is not a detour");
        return None;
    }

    Some(DetourTrim {
        keep_through: approach.index,
        connector: [cut, target],
    })
}

/// Where the next segment starts: its origin if valid, else its first valid geometry point.
fn next_boarding_target(next: &RouteSegment) -> Option<Coordinate> {
    if next.origin.coordinates.is_valid() {
        return Some(next.origin.coordinates);
    }
    next.geometry
        .as_deref()?
        .iter()
        .copied()
        .find(Coordinate::is_valid)
}

/// Trims detouring tails in place and returns the connectors to draw dashed.
///
/// Only pairs where neither segment is a walk are considered; walks are
/// drawn as-is.
pub fn trim_detours(
    segments: &[RouteSegment],
    paths: &mut [Vec<Coordinate>],
    config: &EngineConfig,
) -> Vec<Vec<Coordinate>> {
    let mut connectors = Vec::new();

    for (i, pair) in segments.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if current.is_walk() || next.is_walk() {
            continue;
        }
        let Some(target) = next_boarding_target(next) else {
            continue;
        };
        let Some(path) = paths.get_mut(i) else {
            continue;
        };
        let Some(trim) = find_detour(path, target, config.detour_min_points, &config.segment_detour)
        else {
            continue;
        };

        debug!(
            segment = %current.id,
            kept = trim.keep_through + 1,
            dropped = path.len() - trim.keep_through - 1,
            "trimmed detour before next boarding point"
        );
        path.truncate(trim.keep_through + 1);
        connectors.push(trim.connector.to_vec());
    }

    connectors
}
