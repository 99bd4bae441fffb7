//! Vertex coloring by elevation.
//!
//! A six-color biome palette is spread over an elevation range at fixed
//! fractions, and each vertex color is interpolated between neighboring stops.

mod palette;
mod gradient;

pub use palette::{BiomePalette, Rgba, PALETTE_SIZE};
pub use gradient::{ColorGradient, GradientStop, STOP_FRACTIONS};
