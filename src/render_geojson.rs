//! GeoJSON adapter for web map renderers.
//!
//! Emits a `FeatureCollection` a Leaflet or MapLibre layer can style
//! directly: segment and connector `LineString`s tagged with a `role`, and
//! `Point`s for every marker.

use std::convert::Infallible;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

use crate::endpoints::EndpointKind;
use crate::engine::RenderModel;
use crate::model::Coordinate;
use crate::traits::MapRenderer;
use crate::transfers::TransferKind;

/// Builds GeoJSON from render models. Optionally remembers the mode of each
/// segment so paths can be colored.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonRenderer {
    segment_modes: Vec<String>,
}

impl GeoJsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode per segment path, index-aligned with `segment_paths`.
    pub fn with_segment_modes(mut self, modes: impl IntoIterator<Item = String>) -> Self {
        self.segment_modes = modes.into_iter().collect();
        self
    }

    pub fn render_string(&mut self, model: &RenderModel) -> String {
        match self.render(model) {
            Ok(collection) => GeoJson::from(collection).to_string(),
            Err(never) => match never {},
        }
    }
}

fn position(coord: &Coordinate) -> Vec<f64> {
    vec![coord.longitude, coord.latitude]
}

fn line_feature(path: &[Coordinate], properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(path.iter().map(position).collect()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn point_feature(coord: &Coordinate, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(coord)))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn object(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    }
}

impl MapRenderer for GeoJsonRenderer {
    type Output = FeatureCollection;
    type Error = Infallible;

    fn render(&mut self, model: &RenderModel) -> Result<FeatureCollection, Infallible> {
        let mut features = Vec::new();

        for (index, path) in model.segment_paths.iter().enumerate() {
            if path.len() < 2 {
                continue;
            }
            features.push(line_feature(
                path,
                object(json!({
                    "role": "segment",
                    "segmentIndex": index,
                    "mode": self.segment_modes.get(index),
                })),
            ));
        }

        for connector in &model.connectors {
            features.push(line_feature(
                connector,
                object(json!({ "role": "connector", "dashed": true })),
            ));
        }

        for marker in &model.transfer_markers {
            let kind = match marker.kind {
                TransferKind::Start => "start",
                TransferKind::Alight => "alight",
                TransferKind::Board => "board",
            };
            features.push(point_feature(
                &marker.coordinate,
                object(json!({
                    "role": "transfer",
                    "kind": kind,
                    "number": marker.number,
                    "fromMode": marker.from_mode.as_ref().map(|m| m.as_str()),
                    "toMode": marker.to_mode.as_ref().map(|m| m.as_str()),
                    "locationName": marker.location_name,
                    "nextLocationName": marker.next_location_name,
                    "note": marker.note,
                })),
            ));
        }

        for marker in &model.endpoint_markers {
            let kind = match marker.kind {
                EndpointKind::Start => "start",
                EndpointKind::End => "end",
            };
            features.push(point_feature(
                &marker.coordinate,
                object(json!({
                    "role": "endpoint",
                    "kind": kind,
                    "segmentIndex": marker.segment_index,
                    "mode": marker.mode.as_str(),
                    "modeKind": marker.mode_kind,
                })),
            ));
        }

        let viewport = &model.viewport;
        let half_lat = viewport.lat_span / 2.0;
        let half_lon = viewport.lon_span / 2.0;
        Ok(FeatureCollection {
            bbox: Some(vec![
                viewport.center.longitude - half_lon,
                viewport.center.latitude - half_lat,
                viewport.center.longitude + half_lon,
                viewport.center.latitude + half_lat,
            ]),
            features,
            foreign_members: None,
        })
    }
}
