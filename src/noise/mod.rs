//! Noise generation module for terrain synthesis.
//!
//! A seeded simplex primitive is composed through per-layer octave filters
//! into a single elevation offset per point on the unit sphere.

mod source;
mod filter;
mod compositor;

pub use source::{NoiseSource, Seed, SimplexSource, ConstantSource, RANDOM_SEED_LEN};
pub use filter::{FilterKind, NoiseLayerSettings};
pub use compositor::{NoiseCompositor, NoiseLayer, LayerFault, evaluate_layers, validate_layers};
