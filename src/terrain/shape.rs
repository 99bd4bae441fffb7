//! Planet shape: seed, base radius and the noise field displacing it.

use glam::Vec3;

use crate::error::PlanetError;
use crate::noise::{
    validate_layers, LayerFault, NoiseCompositor, NoiseLayer, NoiseSource, Seed, SimplexSource,
};

/// Immutable shape configuration shared by all six faces.
#[derive(Debug, Clone)]
pub struct PlanetShape<S = SimplexSource> {
    seed: Seed,
    radius: f32,
    noise: NoiseCompositor<S>,
}

impl PlanetShape<SimplexSource> {
    /// Creates a shape sampling seeded simplex noise.
    pub fn new(seed: Seed, radius: f32, layers: Vec<NoiseLayer>) -> Result<Self, PlanetError> {
        let source = SimplexSource::new(&seed);
        Self::with_source(seed, source, radius, layers)
    }
}

impl<S: NoiseSource> PlanetShape<S> {
    /// Creates a shape over an explicit noise primitive.
    pub fn with_source(
        seed: Seed,
        source: S,
        radius: f32,
        layers: Vec<NoiseLayer>,
    ) -> Result<Self, PlanetError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(PlanetError::invalid(format!("radius must be > 0, got {}", radius)));
        }
        validate_layers(&layers)?;
        Ok(Self {
            seed,
            radius,
            noise: NoiseCompositor::new(source, layers),
        })
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn layers(&self) -> &[NoiseLayer] {
        self.noise.layers()
    }

    /// Elevation at a point on the unit sphere: `radius * (1 + deformation)`.
    pub fn elevation_at(&self, point_on_unit_sphere: Vec3) -> Result<f32, LayerFault> {
        let deformation = self.noise.evaluate(point_on_unit_sphere)?;
        Ok(self.radius * (1.0 + deformation))
    }
}

/// Running elevation extrema plus every elevation in recording order.
///
/// Scoped to one face: reset (or use a fresh tracker) before the next face.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationTracker {
    min: f32,
    max: f32,
    elevations: Vec<f32>,
}

impl Default for ElevationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevationTracker {
    /// A pristine tracker: min = +∞, max = −∞, no elevations.
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            elevations: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elevations: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn record(&mut self, elevation: f32) {
        self.elevations.push(elevation);
        self.min = self.min.min(elevation);
        self.max = self.max.max(elevation);
    }

    /// Returns to the pristine state, keeping the allocation.
    pub fn reset(&mut self) {
        self.min = f32::INFINITY;
        self.max = f32::NEG_INFINITY;
        self.elevations.clear();
    }

    pub fn is_pristine(&self) -> bool {
        self.elevations.is_empty() && self.min == f32::INFINITY && self.max == f32::NEG_INFINITY
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// `(min, max)`, or `None` if nothing was recorded.
    pub fn range(&self) -> Option<(f32, f32)> {
        if self.elevations.is_empty() {
            None
        } else {
            Some((self.min, self.max))
        }
    }

    pub fn elevations(&self) -> &[f32] {
        &self.elevations
    }

    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }
}

/// Union of several ranges; `None` if all are empty.
pub fn merge_ranges<I: IntoIterator<Item = Option<(f32, f32)>>>(ranges: I) -> Option<(f32, f32)> {
    ranges.into_iter().flatten().reduce(|(a_min, a_max), (b_min, b_max)| {
        (a_min.min(b_min), a_max.max(b_max))
    })
}
