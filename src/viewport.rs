//! Camera region that frames the visible geometry.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::model::Coordinate;

/// Renderer-agnostic camera region: a center plus padded spans in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center: Coordinate,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl Viewport {
    pub fn contains(&self, coord: Coordinate) -> bool {
        let half_lat = self.lat_span / 2.0 + 1e-9;
        let half_lon = self.lon_span / 2.0 + 1e-9;
        (coord.latitude - self.center.latitude).abs() <= half_lat
            && (coord.longitude - self.center.longitude).abs() <= half_lon
    }
}

/// Fits a padded bounding box over `paths`.
///
/// Invalid coordinates are ignored. With nothing left, frames the origin pin
/// or, failing that, the configured default center.
pub fn fit_viewport<'a>(
    paths: impl IntoIterator<Item = &'a [Coordinate]>,
    origin_pin: Option<Coordinate>,
    config: &EngineConfig,
) -> Viewport {
    let mut points = paths
        .into_iter()
        .flat_map(|path| path.iter().copied())
        .filter(Coordinate::is_valid)
        .peekable();

    let Some(first) = points.peek().copied() else {
        return match origin_pin.filter(Coordinate::is_valid) {
            Some(pin) => Viewport {
                center: pin,
                lat_span: config.pin_span_deg,
                lon_span: config.pin_span_deg,
            },
            None => Viewport {
                center: config.default_center,
                lat_span: config.default_span_deg,
                lon_span: config.default_span_deg,
            },
        };
    };

    let (min_lat, max_lat, min_lon, max_lon) = points.fold(
        (first.latitude, first.latitude, first.longitude, first.longitude),
        |(min_lat, max_lat, min_lon, max_lon), p| {
            (
                min_lat.min(p.latitude),
                max_lat.max(p.latitude),
                min_lon.min(p.longitude),
                max_lon.max(p.longitude),
            )
        },
    );

    Viewport {
        center: Coordinate::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0),
        lat_span: ((max_lat - min_lat) * config.viewport_padding).max(config.viewport_min_span_deg),
        lon_span: ((max_lon - min_lon) * config.viewport_padding).max(config.viewport_min_span_deg),
    }
}
