//! Tunable tolerances for the overlay engine.
//!
//! The defaults encode empirical GPS and stop-snapping noise for Metro Manila
//! routes. Any subset can be overridden from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Coordinate;

/// A resolved path endpoint farther than this from its stop gets the stop prepended/appended.
pub const ANCHOR_TOLERANCE_M: f64 = 30.0;
/// Paths shorter than this are never detour-trimmed.
pub const DETOUR_MIN_POINTS: usize = 6;
/// Pin connectors are only drawn for gaps strictly above this.
pub const PIN_GAP_MIN_M: f64 = 25.0;
/// Pin connectors are only drawn for gaps up to this.
pub const PIN_GAP_MAX_M: f64 = 1200.0;
/// Longitude nudge applied to coincident alight/board markers.
pub const COINCIDENT_OFFSET_DEG: f64 = 0.00012;
pub const VIEWPORT_PADDING: f64 = 1.3;
pub const VIEWPORT_MIN_SPAN_DEG: f64 = 0.01;
pub const PIN_SPAN_DEG: f64 = 0.02;
pub const DEFAULT_SPAN_DEG: f64 = 0.15;
/// Metro Manila.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(14.5995, 120.9842);

/// Thresholds for the closest-approach detour test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetourThresholds {
    /// Closest approach must be within this distance of the target.
    pub max_approach_m: f64,
    /// Remaining straight hop must be at most this.
    pub max_direct_m: f64,
    /// Tail must be longer than this...
    pub min_tail_m: f64,
    /// ...and longer than the direct hop times this.
    pub tail_ratio: f64,
}

impl DetourThresholds {
    /// Segment-to-segment trimming.
    pub const SEGMENT: Self = Self {
        max_approach_m: 120.0,
        max_direct_m: 220.0,
        min_tail_m: 120.0,
        tail_ratio: 2.0,
    };

    /// Trimming the last path toward a destination pin.
    pub const PIN: Self = Self {
        max_approach_m: 80.0,
        max_direct_m: 160.0,
        min_tail_m: 220.0,
        tail_ratio: 3.0,
    };

    pub fn is_detour(&self, direct_m: f64, tail_m: f64) -> bool {
        direct_m <= self.max_direct_m && tail_m > self.min_tail_m.max(direct_m * self.tail_ratio)
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        for value in [self.max_approach_m, self.max_direct_m, self.min_tail_m, self.tail_ratio] {
            positive(field, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub anchor_tolerance_m: f64,
    pub detour_min_points: usize,
    pub segment_detour: DetourThresholds,
    pub pin_detour: DetourThresholds,
    pub pin_gap_min_m: f64,
    pub pin_gap_max_m: f64,
    pub coincident_offset_deg: f64,
    pub viewport_padding: f64,
    pub viewport_min_span_deg: f64,
    pub pin_span_deg: f64,
    pub default_center: Coordinate,
    pub default_span_deg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anchor_tolerance_m: ANCHOR_TOLERANCE_M,
            detour_min_points: DETOUR_MIN_POINTS,
            segment_detour: DetourThresholds::SEGMENT,
            pin_detour: DetourThresholds::PIN,
            pin_gap_min_m: PIN_GAP_MIN_M,
            pin_gap_max_m: PIN_GAP_MAX_M,
            coincident_offset_deg: COINCIDENT_OFFSET_DEG,
            viewport_padding: VIEWPORT_PADDING,
            viewport_min_span_deg: VIEWPORT_MIN_SPAN_DEG,
            pin_span_deg: PIN_SPAN_DEG,
            default_center: DEFAULT_CENTER,
            default_span_deg: DEFAULT_SPAN_DEG,
        }
    }
}

impl EngineConfig {
    /// Parses a (possibly partial) JSON override and validates the result.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("anchor_tolerance_m", self.anchor_tolerance_m)?;
        if self.detour_min_points < 3 {
            return Err(Error::InvalidConfig {
                field: "detour_min_points",
                reason: format!("must be at least 3, got {}", self.detour_min_points),
            });
        }
        self.segment_detour.validate("segment_detour")?;
        self.pin_detour.validate("pin_detour")?;
        positive("pin_gap_min_m", self.pin_gap_min_m)?;
        positive("pin_gap_max_m", self.pin_gap_max_m)?;
        if self.pin_gap_min_m >= self.pin_gap_max_m {
            return Err(Error::InvalidConfig {
                field: "pin_gap_min_m",
                reason: format!(
                    "must be below pin_gap_max_m ({} >= {})",
                    self.pin_gap_min_m, self.pin_gap_max_m
                ),
            });
        }
        positive("coincident_offset_deg", self.coincident_offset_deg)?;
        if !self.viewport_padding.is_finite() || self.viewport_padding < 1.0 {
            return Err(Error::InvalidConfig {
                field: "viewport_padding",
                reason: format!("must be a finite factor >= 1.0, got {}", self.viewport_padding),
            });
        }
        positive("viewport_min_span_deg", self.viewport_min_span_deg)?;
        positive("pin_span_deg", self.pin_span_deg)?;
        positive("default_span_deg", self.default_span_deg)?;
        if !self.default_center.is_valid() {
            return Err(Error::InvalidConfig {
                field: "default_center",
                reason: format!("is not a usable coordinate: {:?}", self.default_center),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: format!("must be finite and positive, got {}", value),
        })
    }
}
