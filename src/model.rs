//! Route input shapes as supplied by the trip-search backend.
//!
//! These types are read-only inputs to the engine. They deserialize straight
//! from the backend's camelCase JSON; the engine never mutates them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// A WGS84 point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite, in range, and not the `(0, 0)` "unset" sentinel.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    /// Stable key at 6-decimal precision (~0.11 m), used for coincidence checks.
    pub fn key(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }

    /// Additive offset in degrees.
    pub fn offset(&self, d_lon: f64, d_lat: f64) -> Self {
        Self {
            latitude: self.latitude + d_lat,
            longitude: self.longitude + d_lon,
        }
    }
}

/// Display class of a transport mode, used for icons, colors and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeKind {
    Walk,
    Bus,
    Jeepney,
    UvExpress,
    Train,
    Other,
}

/// Raw transport mode string from the route provider.
///
/// Transfer detection compares [`TransportType::normalized`] strings, so
/// "LRT" followed by "MRT" counts as a change even though both display as
/// [`ModeKind::Train`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportType(String);

impl TransportType {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn walk() -> Self {
        Self::new("WALK")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased and trimmed raw mode.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }

    pub fn kind(&self) -> ModeKind {
        match self.normalized().as_str() {
            "walk" | "walking" => ModeKind::Walk,
            "bus" => ModeKind::Bus,
            "jeep" | "jeepney" => ModeKind::Jeepney,
            "uv" | "uv express" | "uv_express" | "uvexpress" => ModeKind::UvExpress,
            "train" | "lrt" | "mrt" | "pnr" | "rail" => ModeKind::Train,
            _ => ModeKind::Other,
        }
    }

    pub fn is_walk(&self) -> bool {
        self.kind() == ModeKind::Walk
    }

    /// Human label for marker notes.
    pub fn label(&self) -> String {
        match self.kind() {
            ModeKind::Walk => "Walk".to_string(),
            ModeKind::Bus => "Bus".to_string(),
            ModeKind::Jeepney => "Jeepney".to_string(),
            ModeKind::UvExpress => "UV Express".to_string(),
            ModeKind::Train => match self.normalized().as_str() {
                "lrt" | "mrt" | "pnr" => self.normalized().to_uppercase(),
                _ => "Train".to_string(),
            },
            ModeKind::Other => self.0.trim().to_string(),
        }
    }
}

/// A named stop or place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinate,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

/// One leg of a multi-modal route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub id: String,
    pub transport_type: TransportType,
    pub origin: Location,
    pub destination: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<Coordinate>>,
}

impl RouteSegment {
    pub fn new(
        id: impl Into<String>,
        transport_type: TransportType,
        origin: Location,
        destination: Location,
    ) -> Self {
        Self {
            id: id.into(),
            transport_type,
            origin,
            destination,
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: Vec<Coordinate>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Attach geometry given as a precision-5 encoded polyline.
    pub fn with_encoded_geometry(self, encoded: &str) -> Result<Self> {
        let polyline = crate::polyline::Polyline::from_encoded(encoded)?;
        Ok(self.with_geometry(polyline.into_points()))
    }

    pub fn is_walk(&self) -> bool {
        self.transport_type.is_walk()
    }

    /// Where the traveler gets on: first valid geometry point, else the origin.
    pub fn board_coordinate(&self) -> Coordinate {
        self.geometry
            .as_deref()
            .and_then(|geom| geom.iter().copied().find(Coordinate::is_valid))
            .unwrap_or(self.origin.coordinates)
    }

    /// Where the traveler gets off: last valid geometry point, else the destination.
    pub fn alight_coordinate(&self) -> Coordinate {
        self.geometry
            .as_deref()
            .and_then(|geom| geom.iter().rev().copied().find(Coordinate::is_valid))
            .unwrap_or(self.destination.coordinates)
    }
}

/// An ordered multi-segment route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    #[serde(deserialize_with = "skip_null_segments")]
    pub segments: Vec<RouteSegment>,
}

impl Route {
    pub fn new(id: impl Into<String>, segments: Vec<RouteSegment>) -> Self {
        Self {
            id: id.into(),
            segments,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn skip_null_segments<'de, D>(deserializer: D) -> std::result::Result<Vec<RouteSegment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<RouteSegment>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().flatten().collect())
}
