//! Error types for planet generation.

use thiserror::Error;

use crate::geometry::CubeFaceId;

/// Errors surfaced by planet generation.
///
/// Generation is pure: retrying with the same inputs reproduces the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanetError {
    /// Rejected before any geometry is built.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A face build produced a non-finite value and was aborted.
    #[error("Generation failed on face {face:?}{}: {reason}", layer_suffix(.layer))]
    Generation {
        face: CubeFaceId,
        layer: Option<usize>,
        reason: String,
    },

    /// A color gradient could not be built.
    #[error("Color mapping error: {0}")]
    ColorMapping(String),
}

fn layer_suffix(layer: &Option<usize>) -> String {
    match layer {
        Some(index) => format!(" (noise layer {})", index),
        None => String::new(),
    }
}

impl PlanetError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PlanetError::InvalidConfiguration(msg.into())
    }
}
