//! Weighted composition of noise layers into one elevation offset.
//!
//! Layer 0 is the mask source. It is always evaluated and is never summed
//! directly: it enters the total only when its own `use_as_layer_mask` flag
//! is set, and it scales every later layer that sets `use_as_layer_mask`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::PlanetError;
use super::filter::NoiseLayerSettings;
use super::source::NoiseSource;

/// One entry in a planet's ordered layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: NoiseLayerSettings,
}

fn enabled_default() -> bool {
    true
}

impl NoiseLayer {
    /// Creates an enabled layer.
    pub fn new(settings: NoiseLayerSettings) -> Self {
        Self {
            enabled: true,
            settings,
        }
    }

    /// Returns a copy with `enabled` set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Validates every layer, naming the first offending index.
pub fn validate_layers(layers: &[NoiseLayer]) -> Result<(), PlanetError> {
    for (i, layer) in layers.iter().enumerate() {
        layer.settings.validate().map_err(|e| match e {
            PlanetError::InvalidConfiguration(msg) => {
                PlanetError::invalid(format!("noise layer {}: {}", i, msg))
            }
            other => other,
        })?;
    }
    Ok(())
}

/// A layer whose filter output was not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerFault {
    /// Index of the layer within the full stack.
    pub layer: usize,
    pub value: f32,
}

/// Evaluates a mask-source layer and the remaining layers at `point`.
///
/// `rest[i]` is layer `i + 1` of the stack; fault indices are reported
/// against the full stack.
pub fn evaluate_layers<S: NoiseSource + ?Sized>(
    source: &S,
    point: Vec3,
    mask_source: &NoiseLayer,
    rest: &[NoiseLayer],
) -> Result<f32, LayerFault> {
    let first = &mask_source.settings;
    let first_value = checked(first.filter.apply(source, point, first), 0)?;

    let mut deformation = if first.use_as_layer_mask { first_value } else { 0.0 };

    for (offset, layer) in rest.iter().enumerate() {
        if !layer.enabled {
            continue;
        }
        let mask = if layer.settings.use_as_layer_mask { first_value } else { 1.0 };
        let index = offset + 1;
        let value = layer.settings.filter.apply(source, point, &layer.settings);
        deformation = checked(deformation + checked(value, index)? * mask, index)?;
    }

    Ok(deformation)
}

fn checked(value: f32, layer: usize) -> Result<f32, LayerFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayerFault { layer, value })
    }
}

/// The noise field of a planet: one primitive plus an ordered layer stack.
#[derive(Debug, Clone)]
pub struct NoiseCompositor<S> {
    source: S,
    layers: Vec<NoiseLayer>,
}

impl<S: NoiseSource> NoiseCompositor<S> {
    pub fn new(source: S, layers: Vec<NoiseLayer>) -> Self {
        Self { source, layers }
    }

    pub fn layers(&self) -> &[NoiseLayer] {
        &self.layers
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Elevation offset at a point on the unit sphere; 0 for an empty stack.
    pub fn evaluate(&self, point_on_unit_sphere: Vec3) -> Result<f32, LayerFault> {
        match self.layers.split_first() {
            None => Ok(0.0),
            Some((mask_source, rest)) => {
                evaluate_layers(&self.source, point_on_unit_sphere, mask_source, rest)
            }
        }
    }
}
