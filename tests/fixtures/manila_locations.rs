//! Real Metro Manila stops for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Stop positions are the
//! approximate boarding points, not building centroids.

use route_overlay::{Coordinate, Location};

/// A named stop with coordinates.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn location(&self) -> Location {
        Location::new(self.name, self.coords())
    }
}

// ============================================================================
// Jeepney / bus terminals
// ============================================================================

pub const QUIAPO_CHURCH: Stop = Stop::new("Quiapo Church", 14.5987, 120.9837);
pub const CUBAO_FARMERS: Stop = Stop::new("Cubao Farmers Plaza", 14.6195, 121.0527);
pub const PITX: Stop = Stop::new("Parañaque Integrated Terminal Exchange", 14.5095, 120.9911);
pub const LAWTON: Stop = Stop::new("Lawton", 14.5946, 120.9804);
pub const OSMENA_HIGHWAY: Stop = Stop::new("Osmeña Highway", 14.5640, 121.0040);

// ============================================================================
// Rail stations
// ============================================================================

pub const LRT1_CENTRAL: Stop = Stop::new("LRT-1 Central Terminal", 14.5929, 120.9816);
pub const LRT1_EDSA: Stop = Stop::new("LRT-1 EDSA", 14.5386, 121.0006);
pub const MRT3_TAFT: Stop = Stop::new("MRT-3 Taft Avenue", 14.5376, 121.0014);
pub const MRT3_CUBAO: Stop = Stop::new("MRT-3 Araneta Center-Cubao", 14.6196, 121.0513);

// ============================================================================
// Places people start from
// ============================================================================

pub const UST_ESPANA: Stop = Stop::new("UST España Gate", 14.6096, 120.9894);
pub const SM_MEGAMALL: Stop = Stop::new("SM Megamall", 14.5850, 121.0566);
