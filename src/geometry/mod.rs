//! Cube-sphere geometry module.
//!
//! Provides the six cube faces with their in-face axes and the mapping
//! from a face grid onto the unit sphere.

mod face;
mod cube_sphere;

pub use face::CubeFaceId;
pub use cube_sphere::{FaceCoord, face_uv_to_cube, cube_to_sphere};
