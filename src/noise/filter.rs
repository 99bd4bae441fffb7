//! Octave noise filters applied per layer.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PlanetError;
use super::source::NoiseSource;

/// Shape of the octave loop used by a noise layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    /// Smooth fBm remapped to [0, 1] per octave.
    #[default]
    Simple,
    /// Inverted absolute noise with octave weight feedback (mountain crests).
    Ridged,
}

impl FilterKind {
    /// Parses a filter name. Unrecognized names fall back to `Simple`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "simple" => FilterKind::Simple,
            "ridged" => FilterKind::Ridged,
            other => {
                log::warn!("unknown noise filter '{}', falling back to simple", other);
                FilterKind::Simple
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FilterKind::Simple => "simple",
            FilterKind::Ridged => "ridged",
        }
    }

    /// Evaluates this filter at `point` with the given layer settings.
    pub fn apply<S: NoiseSource + ?Sized>(
        self,
        source: &S,
        point: Vec3,
        settings: &NoiseLayerSettings,
    ) -> f32 {
        match self {
            FilterKind::Simple => simple_filter(source, point, settings),
            FilterKind::Ridged => ridged_filter(source, point, settings),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FilterKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FilterKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(FilterKind::from_name(&name))
    }
}

/// Parameters of one noise layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayerSettings {
    /// Octave loop shape.
    pub filter: FilterKind,
    /// Number of octaves.
    pub num_layers: u32,
    /// Scale other layers by this layer's output (layer 0) or by layer 0's output (others).
    pub use_as_layer_mask: bool,
    /// Frequency of the first octave.
    pub base_roughness: f32,
    /// Frequency multiplier per octave.
    pub roughness: f32,
    /// Output scale.
    pub strength: f32,
    /// Amplitude multiplier per octave.
    #[serde(alias = "persistance")]
    pub persistence: f32,
    /// Offset added to the sample point every octave.
    pub center: Vec3,
    /// Threshold subtracted before clamping to zero.
    pub min_value: f32,
}

impl Default for NoiseLayerSettings {
    fn default() -> Self {
        Self {
            filter: FilterKind::Simple,
            num_layers: 5,
            use_as_layer_mask: false,
            base_roughness: 1.0,
            roughness: 2.0,
            strength: 1.0,
            persistence: 0.5,
            center: Vec3::ZERO,
            min_value: 0.0,
        }
    }
}

impl NoiseLayerSettings {
    /// Broad continents: the base layer of the default planet.
    pub fn continents() -> Self {
        Self {
            filter: FilterKind::Simple,
            num_layers: 5,
            use_as_layer_mask: false,
            base_roughness: 1.25,
            roughness: 2.5,
            strength: 2.5,
            persistence: 0.25,
            center: Vec3::ZERO,
            min_value: 0.55,
        }
    }

    /// Hills masked by the continent layer.
    pub fn masked_hills() -> Self {
        Self {
            filter: FilterKind::Simple,
            num_layers: 5,
            use_as_layer_mask: true,
            base_roughness: 1.5,
            roughness: 1.5,
            strength: 2.0,
            persistence: 0.25,
            center: Vec3::ZERO,
            min_value: 2.0,
        }
    }

    /// Ridged mountain crests masked by the continent layer.
    pub fn masked_ridges() -> Self {
        Self {
            filter: FilterKind::Ridged,
            num_layers: 5,
            use_as_layer_mask: true,
            base_roughness: 2.0,
            roughness: 2.0,
            strength: 0.35,
            persistence: 0.25,
            center: Vec3::ZERO,
            min_value: 0.85,
        }
    }

    /// Checks the invariants a layer must hold before generation starts.
    pub fn validate(&self) -> Result<(), PlanetError> {
        if self.num_layers == 0 {
            return Err(PlanetError::invalid("noise layer needs at least one octave"));
        }
        if !(self.base_roughness > 0.0) {
            return Err(PlanetError::invalid(format!(
                "base roughness must be > 0, got {}",
                self.base_roughness
            )));
        }
        let scalars = [
            ("roughness", self.roughness),
            ("strength", self.strength),
            ("persistence", self.persistence),
            ("min value", self.min_value),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(PlanetError::invalid(format!("{} must be finite, got {}", name, value)));
            }
        }
        if !self.center.is_finite() {
            return Err(PlanetError::invalid(format!(
                "center must be finite, got {:?}",
                self.center
            )));
        }
        Ok(())
    }
}

/// `max(0, v)` that keeps NaN visible to the caller.
fn floor_at_zero(v: f32) -> f32 {
    if v.is_nan() { v } else { v.max(0.0) }
}

/// Simple filter: per octave the point is scaled by the current frequency
/// and offset by `center`, cumulatively across octaves.
fn simple_filter<S: NoiseSource + ?Sized>(
    source: &S,
    mut point: Vec3,
    settings: &NoiseLayerSettings,
) -> f32 {
    let mut value = 0.0f32;
    let mut frequency = settings.base_roughness;
    let mut amplitude = 1.0f32;

    for _ in 0..settings.num_layers {
        point = point * frequency + settings.center;
        let v = source.sample(point);
        value += (v + 1.0) * 0.5 * amplitude;
        frequency *= settings.roughness;
        amplitude *= settings.persistence;
    }

    floor_at_zero(value - settings.min_value) * settings.strength
}

/// Ridged filter: `(1 - |n|)²` weighted by the previous octave's ridge value.
fn ridged_filter<S: NoiseSource + ?Sized>(
    source: &S,
    mut point: Vec3,
    settings: &NoiseLayerSettings,
) -> f32 {
    let mut value = 0.0f32;
    let mut frequency = settings.base_roughness;
    let mut amplitude = 1.0f32;
    let mut weight = 1.0f32;

    for _ in 0..settings.num_layers {
        point = point * frequency + settings.center;
        let mut v = 1.0 - source.sample(point).abs();
        v *= v;
        v *= weight;
        weight = v;
        value += (v + 1.0) * 0.5 * amplitude;
        frequency *= settings.roughness;
        amplitude *= settings.persistence;
    }

    floor_at_zero(value - settings.min_value) * settings.strength
}
