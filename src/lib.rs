//! Procedural planet mesh generator.
//!
//! This crate builds planets as six cube-sphere face meshes displaced by a
//! stack of layered noise filters and colored by elevation gradients.

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod terrain;

pub use color::{BiomePalette, ColorGradient, Rgba};
pub use config::{ConfigError, PlanetConfig};
pub use error::PlanetError;
pub use geometry::{CubeFaceId, FaceCoord};
pub use noise::{FilterKind, NoiseLayer, NoiseLayerSettings, Seed};
pub use terrain::{FaceMesh, GradientScope, Planet, PlanetGenerator, PlanetShape};
