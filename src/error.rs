//! Error type for the input boundaries of the overlay engine.
//!
//! The geometry pipeline itself never fails; these errors only come from
//! parsing caller-supplied configuration, route JSON, or encoded polylines.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid engine config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to decode polyline: {0}")]
    PolylineDecode(String),

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
