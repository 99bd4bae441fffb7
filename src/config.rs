//! Planet configuration: every externally adjustable generation parameter.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::BiomePalette;
use crate::error::PlanetError;
use crate::noise::{validate_layers, NoiseLayer, NoiseLayerSettings, Seed};
use crate::terrain::{
    check_resolution, GradientScope, PaletteAssignment, PlanetGenerator, PlanetShape,
};

/// Errors that can occur while loading or applying a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] PlanetError),
}

/// Full description of a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Seed for the noise primitive (number or text). Random when omitted.
    pub seed: Seed,
    /// Base radius before displacement.
    pub radius: f32,
    /// Vertices per face side.
    pub resolution: u32,
    /// Ordered noise layers; layer 0 is the mask source.
    pub layers: Vec<NoiseLayer>,
    /// Available palettes.
    pub palettes: Vec<BiomePalette>,
    /// Palette index per face in generation order. `None` uses palette 0 everywhere.
    pub face_palettes: Option<[usize; 6]>,
    /// Elevation range the color gradients are normalized against.
    pub gradient_scope: GradientScope,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            seed: Seed::random(),
            radius: 2.0,
            resolution: 100,
            layers: vec![
                NoiseLayer::new(NoiseLayerSettings::continents()),
                NoiseLayer::new(NoiseLayerSettings::masked_hills()),
                NoiseLayer::new(NoiseLayerSettings::masked_ridges()),
            ],
            palettes: BiomePalette::presets(),
            face_palettes: None,
            gradient_scope: GradientScope::PerFace,
        }
    }
}

impl PlanetConfig {
    /// Creates the default planet with the given seed.
    pub fn with_seed(seed: impl Into<Seed>) -> Self {
        Self {
            seed: seed.into(),
            ..Default::default()
        }
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: PlanetConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every configuration rule without building any geometry.
    pub fn validate(&self) -> Result<(), PlanetError> {
        check_resolution(self.resolution)?;
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(PlanetError::invalid(format!("radius must be > 0, got {}", self.radius)));
        }
        validate_layers(&self.layers)?;
        if self.palettes.is_empty() {
            return Err(PlanetError::invalid("at least one palette is required"));
        }
        if let Some(indices) = self.face_palettes {
            if let Some(&bad) = indices.iter().find(|&&i| i >= self.palettes.len()) {
                return Err(PlanetError::invalid(format!(
                    "face palette index {} out of range ({} palettes)",
                    bad,
                    self.palettes.len()
                )));
            }
        }
        Ok(())
    }

    /// Resolves the palette index table into palettes.
    pub fn palette_assignment(&self) -> Result<PaletteAssignment, PlanetError> {
        let pick = |i: usize| {
            self.palettes
                .get(i)
                .cloned()
                .ok_or_else(|| PlanetError::invalid(format!("palette index {} out of range", i)))
        };
        match self.face_palettes {
            None => Ok(PaletteAssignment::Global(pick(0)?)),
            Some([a, b, c, d, e, f]) => Ok(PaletteAssignment::PerFace(Box::new([
                pick(a)?,
                pick(b)?,
                pick(c)?,
                pick(d)?,
                pick(e)?,
                pick(f)?,
            ]))),
        }
    }

    /// Validates and builds a generator sampling seeded simplex noise.
    pub fn generator(&self) -> Result<PlanetGenerator, PlanetError> {
        self.validate()?;
        let shape = PlanetShape::new(self.seed.clone(), self.radius, self.layers.clone())?;
        Ok(PlanetGenerator::new(shape, self.palette_assignment()?, self.resolution)?
            .with_gradient_scope(self.gradient_scope))
    }
}
