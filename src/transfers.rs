//! Numbered transfer annotations along a route.
//!
//! A transfer is any point where the traveler gets onto a vehicle after
//! having been on a different mode, or after walking between two rides of the
//! same mode. Walk segments never produce markers of their own.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::model::{Coordinate, RouteSegment, TransportType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    Start,
    Alight,
    Board,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMarker {
    pub coordinate: Coordinate,
    /// 0 for the start marker, 1.. for transfers.
    pub number: u32,
    pub kind: TransferKind,
    pub from_mode: Option<TransportType>,
    pub to_mode: Option<TransportType>,
    pub location_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_location_name: Option<String>,
    pub note: String,
}

/// Accumulator for the boundary scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ScanState {
    last_non_walk: Option<usize>,
    saw_walk_since_last_non_walk: bool,
    boundaries: Vec<usize>,
}

impl ScanState {
    fn step(self, index: usize, segments: &[RouteSegment]) -> Self {
        let segment = &segments[index];
        if segment.is_walk() {
            return Self {
                saw_walk_since_last_non_walk: self.saw_walk_since_last_non_walk
                    || self.last_non_walk.is_some(),
                ..self
            };
        }

        let mut boundaries = self.boundaries;
        if let Some(prev) = self.last_non_walk {
            let mode_changed = segments[prev].transport_type.normalized()
                != segment.transport_type.normalized();
            if mode_changed || self.saw_walk_since_last_non_walk {
                boundaries.push(index);
            }
        }
        Self {
            last_non_walk: Some(index),
            saw_walk_since_last_non_walk: false,
            boundaries,
        }
    }
}

/// Indices of non-walk segments that start a new transfer.
///
/// The first ride never counts; a later ride counts when its normalized raw
/// mode differs from the previous ride's, or when a walk came in between.
pub fn transfer_boundaries(segments: &[RouteSegment]) -> Vec<usize> {
    (0..segments.len())
        .fold(ScanState::default(), |state, index| state.step(index, segments))
        .boundaries
}

/// Builds the start marker, the first boarding marker, and an alight/board
/// pair for every transfer boundary.
pub fn build_transfer_markers(
    segments: &[RouteSegment],
    origin_pin: Option<Coordinate>,
    config: &EngineConfig,
) -> Vec<TransferMarker> {
    let mut markers = Vec::new();
    let first_ride = segments.iter().position(|segment| !segment.is_walk());

    if let Some(pin) = origin_pin.filter(Coordinate::is_valid) {
        markers.push(start_marker(segments, first_ride, pin));
    }

    let Some(first_ride) = first_ride else {
        return markers;
    };

    let mut number = 1;
    let first = &segments[first_ride];
    let board = first.board_coordinate();
    if board.is_valid() {
        markers.push(TransferMarker {
            coordinate: board,
            number,
            kind: TransferKind::Board,
            from_mode: first_ride
                .checked_sub(1)
                .map(|prev| segments[prev].transport_type.clone()),
            to_mode: Some(first.transport_type.clone()),
            location_name: first.origin.name.clone(),
            next_location_name: Some(first.destination.name.clone()),
            note: format!("Board {} here.", first.transport_type.label()),
        });
    }

    let mut seen: HashSet<String> = HashSet::new();
    for index in transfer_boundaries(segments) {
        let Some(prev_index) = (0..index).rev().find(|&j| !segments[j].is_walk()) else {
            continue;
        };
        let prev = &segments[prev_index];
        let current = &segments[index];
        let alight = prev.alight_coordinate();
        let board = current.board_coordinate();
        if !alight.is_valid() || !board.is_valid() {
            continue;
        }

        let candidate = number + 1;
        let (alight, board, key) = if alight.key() == board.key() {
            let nudged = (
                alight.offset(-config.coincident_offset_deg, 0.0),
                board.offset(config.coincident_offset_deg, 0.0),
            );
            let key = format!("{}|{}|{}", alight.key(), board.key(), candidate);
            if nudged.0.is_valid() && nudged.1.is_valid() {
                (nudged.0, nudged.1, key)
            } else {
                (alight, board, key)
            }
        } else {
            (alight, board, format!("{}|{}", alight.key(), board.key()))
        };
        if !seen.insert(key) {
            continue;
        }
        number = candidate;

        markers.push(TransferMarker {
            coordinate: alight,
            number,
            kind: TransferKind::Alight,
            from_mode: Some(prev.transport_type.clone()),
            to_mode: Some(current.transport_type.clone()),
            location_name: prev.destination.name.clone(),
            next_location_name: Some(current.origin.name.clone()),
            note: format!("Alight from {} here.", prev.transport_type.label()),
        });
        markers.push(TransferMarker {
            coordinate: board,
            number,
            kind: TransferKind::Board,
            from_mode: Some(prev.transport_type.clone()),
            to_mode: Some(current.transport_type.clone()),
            location_name: current.origin.name.clone(),
            next_location_name: Some(current.destination.name.clone()),
            note: format!("Board {} here.", current.transport_type.label()),
        });
    }

    markers
}

fn start_marker(
    segments: &[RouteSegment],
    first_ride: Option<usize>,
    pin: Coordinate,
) -> TransferMarker {
    let location_name = segments
        .first()
        .map(|segment| segment.origin.name.clone())
        .unwrap_or_else(|| "Starting point".to_string());

    match first_ride.map(|index| &segments[index]) {
        Some(ride) => TransferMarker {
            coordinate: pin,
            number: 0,
            kind: TransferKind::Start,
            from_mode: Some(TransportType::walk()),
            to_mode: Some(ride.transport_type.clone()),
            location_name,
            next_location_name: Some(ride.origin.name.clone()),
            note: format!(
                "Start here. Walk to {} and board {}.",
                ride.origin.name,
                ride.transport_type.label()
            ),
        },
        None => TransferMarker {
            coordinate: pin,
            number: 0,
            kind: TransferKind::Start,
            from_mode: Some(TransportType::walk()),
            to_mode: None,
            location_name,
            next_location_name: segments.last().map(|segment| segment.destination.name.clone()),
            note: "Start here and walk to your destination.".to_string(),
        },
    }
}
