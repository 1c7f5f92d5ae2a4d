//! Route overlay engine (pure, single pass per input change).

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::endpoints::{EndpointMarker, build_anchor_connectors, build_endpoint_markers};
use crate::model::{Coordinate, Route};
use crate::resolver::resolve_all;
use crate::smoother::trim_detours;
use crate::transfers::{TransferMarker, build_transfer_markers};
use crate::viewport::{Viewport, fit_viewport};

/// Everything a renderer needs to draw one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    /// One path per segment, index-aligned with `route.segments`.
    pub segment_paths: Vec<Vec<Coordinate>>,
    /// Two-point gap bridges, drawn dashed.
    pub connectors: Vec<Vec<Coordinate>>,
    pub transfer_markers: Vec<TransferMarker>,
    pub endpoint_markers: Vec<EndpointMarker>,
    pub viewport: Viewport,
}

/// One route plus the user's pins.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRequest {
    pub route: Route,
    pub origin_pin: Option<Coordinate>,
    pub destination_pin: Option<Coordinate>,
}

impl OverlayRequest {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            origin_pin: None,
            destination_pin: None,
        }
    }

    pub fn with_origin(mut self, pin: Coordinate) -> Self {
        self.origin_pin = Some(pin);
        self
    }

    pub fn with_destination(mut self, pin: Coordinate) -> Self {
        self.destination_pin = Some(pin);
        self
    }
}

/// Builds the render model for `route`.
///
/// Deterministic: identical inputs always produce an identical model.
pub fn annotate(
    route: &Route,
    origin_pin: Option<Coordinate>,
    destination_pin: Option<Coordinate>,
    config: &EngineConfig,
) -> RenderModel {
    let segments = &route.segments;

    let mut segment_paths = resolve_all(segments, config);
    let mut connectors = trim_detours(segments, &mut segment_paths, config);
    connectors.extend(build_anchor_connectors(
        segments,
        &mut segment_paths,
        origin_pin,
        destination_pin,
        config,
    ));

    let transfer_markers = build_transfer_markers(segments, origin_pin, config);
    let endpoint_markers = build_endpoint_markers(segments);
    let viewport = fit_viewport(segment_paths.iter().map(Vec::as_slice), origin_pin, config);

    debug!(
        route = %route.id,
        segments = segments.len(),
        connectors = connectors.len(),
        transfers = transfer_markers.len(),
        "annotated route"
    );

    RenderModel {
        segment_paths,
        connectors,
        transfer_markers,
        endpoint_markers,
        viewport,
    }
}

/// Annotates independent requests in parallel, preserving input order.
pub fn annotate_many(requests: &[OverlayRequest], config: &EngineConfig) -> Vec<RenderModel> {
    requests
        .par_iter()
        .map(|request| {
            annotate(
                &request.route,
                request.origin_pin,
                request.destination_pin,
                config,
            )
        })
        .collect()
}

/// Memoizes the last model by route id and pin keys.
#[derive(Debug, Default)]
pub struct OverlayCache {
    last: Option<(CacheKey, RenderModel)>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    route_id: String,
    origin: Option<String>,
    destination: Option<String>,
}

impl CacheKey {
    fn new(route: &Route, origin: Option<Coordinate>, destination: Option<Coordinate>) -> Self {
        Self {
            route_id: route.id.clone(),
            origin: origin.map(|c| c.key()),
            destination: destination.map(|c| c.key()),
        }
    }
}

impl OverlayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached model when route id and pins are unchanged,
    /// otherwise recomputes it.
    pub fn get_or_annotate(
        &mut self,
        route: &Route,
        origin_pin: Option<Coordinate>,
        destination_pin: Option<Coordinate>,
        config: &EngineConfig,
    ) -> &RenderModel {
        let key = CacheKey::new(route, origin_pin, destination_pin);
        if matches!(&self.last, Some((cached, _)) if *cached == key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.last = None;
        }
        let (_, model) = self
            .last
            .get_or_insert_with(|| (key, annotate(route, origin_pin, destination_pin, config)));
        model
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
