//! Polyline representation for segment geometries.
//!
//! Holds decoded coordinates and the nearest-point searches the resolver,
//! smoother and anchor builder share. Encoded polylines are decoded at the
//! boundary via [`Polyline::from_encoded`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::haversine::{distance_meters, polyline_length_meters};
use crate::model::Coordinate;

/// Precision used by the trip-search backend when encoding shapes.
pub const ENCODED_PRECISION: u32 = 5;

/// Closest point of a polyline to some target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub index: usize,
    pub distance_m: f64,
}

/// A polyline as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Keeps only coordinates passing [`Coordinate::is_valid`].
    pub fn valid_only(points: &[Coordinate]) -> Self {
        Self {
            points: points.iter().copied().filter(Coordinate::is_valid).collect(),
        }
    }

    /// Decodes a Google encoded polyline at [`ENCODED_PRECISION`].
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let line = ::polyline::decode_polyline(encoded, ENCODED_PRECISION)
            .map_err(|err| Error::PolylineDecode(err.to_string()))?;
        let points = line
            .into_iter()
            .map(|coord| Coordinate::new(coord.y, coord.x))
            .collect();
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn length_meters(&self) -> f64 {
        polyline_length_meters(&self.points)
    }

    /// Index nearest to `target`, scanning forward. Ties keep the first occurrence.
    pub fn nearest_index(&self, target: Coordinate) -> Option<usize> {
        nearest_in(self.points.iter().copied().enumerate(), target).map(|a| a.index)
    }

    /// Index nearest to `target`, scanning from the end. Ties keep the later occurrence.
    pub fn nearest_index_from_end(&self, target: Coordinate) -> Option<usize> {
        nearest_in(self.points.iter().copied().enumerate().rev(), target).map(|a| a.index)
    }

    /// Closest approach to `target`, ignoring the final two points so a trim
    /// always leaves a tail worth cutting.
    pub fn closest_approach(&self, target: Coordinate) -> Option<Approach> {
        let searchable = self.points.len().checked_sub(2)?;
        nearest_in(self.points[..searchable].iter().copied().enumerate(), target)
    }
}

fn nearest_in(
    candidates: impl Iterator<Item = (usize, Coordinate)>,
    target: Coordinate,
) -> Option<Approach> {
    let mut best: Option<Approach> = None;
    for (index, point) in candidates {
        let distance_m = distance_meters(point, target);
        if best.is_none_or(|b| distance_m < b.distance_m) {
            best = Some(Approach { index, distance_m });
        }
    }
    best
}
