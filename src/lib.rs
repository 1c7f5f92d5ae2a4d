//! route-overlay
//!
//! Turns a multi-modal transit route into a clean map overlay: per-segment
//! paths, transfer markers, gap connectors and a fitted viewport. Renderer
//! agnostic; see [`traits::MapRenderer`].

pub mod config;
pub mod endpoints;
pub mod engine;
pub mod error;
pub mod haversine;
pub mod model;
pub mod polyline;
pub mod render_geojson;
pub mod resolver;
pub mod smoother;
pub mod traits;
pub mod transfers;
pub mod viewport;

pub use config::EngineConfig;
pub use engine::{OverlayCache, OverlayRequest, RenderModel, annotate, annotate_many};
pub use error::{Error, Result};
pub use model::{Coordinate, Location, ModeKind, Route, RouteSegment, TransportType};
