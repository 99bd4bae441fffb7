//! Terrain generation module.
//!
//! Provides the planet shape, the per-face mesh builder and the planet
//! generator that sequences build and coloring across the six faces.

mod shape;
mod mesh;
mod planet;

pub use shape::{PlanetShape, ElevationTracker, merge_ranges};
pub use mesh::{
    FaceMesh, build_face_mesh, check_resolution, grid_indices, smooth_normals, index_count,
    MAX_RESOLUTION,
};
pub use planet::{Planet, PlanetGenerator, PaletteAssignment, GradientScope};
