//! Renderer seam.
//!
//! The engine never draws. Each map target (native map, web map, WebView
//! bridge) implements [`MapRenderer`] as a thin adapter over its own drawing
//! primitives and consumes the [`RenderModel`] read-only.

use crate::engine::RenderModel;

/// Translates a render model into a renderer's own representation.
pub trait MapRenderer {
    type Output;
    type Error;

    fn render(&mut self, model: &RenderModel) -> Result<Self::Output, Self::Error>;
}
