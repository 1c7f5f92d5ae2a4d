//! Per-segment mode badges and the dashed connectors that tie user pins to
//! the route.

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::haversine::distance_meters;
use crate::model::{Coordinate, ModeKind, RouteSegment, TransportType};
use crate::smoother::find_detour;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Start,
    End,
}

/// Mode badge at one end of a segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMarker {
    pub segment_index: usize,
    pub coordinate: Coordinate,
    pub kind: EndpointKind,
    pub mode: TransportType,
    pub mode_kind: ModeKind,
}

/// A start badge at each segment's board point, plus an end badge at its
/// alight point unless the two coincide.
pub fn build_endpoint_markers(segments: &[RouteSegment]) -> Vec<EndpointMarker> {
    let mut markers = Vec::with_capacity(segments.len() * 2);
    for (segment_index, segment) in segments.iter().enumerate() {
        let board = segment.board_coordinate();
        let alight = segment.alight_coordinate();
        if !board.is_valid() || !alight.is_valid() {
            continue;
        }

        let badge = |coordinate, kind| EndpointMarker {
            segment_index,
            coordinate,
            kind,
            mode: segment.transport_type.clone(),
            mode_kind: segment.transport_type.kind(),
        };
        markers.push(badge(board, EndpointKind::Start));
        if board.key() != alight.key() {
            markers.push(badge(alight, EndpointKind::End));
        }
    }
    markers
}

fn gap_in_window(gap_m: f64, config: &EngineConfig) -> bool {
    gap_m > config.pin_gap_min_m && gap_m <= config.pin_gap_max_m
}

/// Connectors from the user's pins to the route.
///
/// The origin pin joins the start of the first path. The destination pin
/// first gets a detour test against the last path, which may trim it; if no
/// detour is found the pin joins the end of the last path. Walk legs at either
/// boundary already reach the pin and get no connector.
pub fn build_anchor_connectors(
    segments: &[RouteSegment],
    paths: &mut [Vec<Coordinate>],
    origin_pin: Option<Coordinate>,
    destination_pin: Option<Coordinate>,
    config: &EngineConfig,
) -> Vec<Vec<Coordinate>> {
    let mut connectors = Vec::new();

    if let (Some(pin), Some(first), Some(path)) = (
        origin_pin.filter(Coordinate::is_valid),
        segments.first(),
        paths.first(),
    ) {
        if let Some(&start) = path.first().filter(|_| !first.is_walk()) {
            let gap_m = distance_meters(pin, start);
            if gap_in_window(gap_m, config) {
                debug!(gap_m, "connecting origin pin to route");
                connectors.push(vec![pin, start]);
            }
        }
    }

    if let (Some(pin), Some(last), Some(path)) = (
        destination_pin.filter(Coordinate::is_valid),
        segments.last(),
        paths.last_mut(),
    ) {
        if let Some(&end) = path.last().filter(|_| !last.is_walk()) {
            let gap_m = distance_meters(end, pin);
            if gap_in_window(gap_m, config) {
                match find_detour(path, pin, config.detour_min_points, &config.pin_detour) {
                    Some(trim) => {
                        debug!(gap_m, kept = trim.keep_through + 1, "trimmed last path toward destination pin");
                        path.truncate(trim.keep_through + 1);
                        connectors.push(trim.connector.to_vec());
                    }
                    None => {
                        debug!(gap_m, "connecting route to destination pin");
                        connectors.push(vec![end, pin]);
                    }
                }
            }
        }
    }

    connectors
}
