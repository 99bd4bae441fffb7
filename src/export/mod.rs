//! Export module for handing generated planets to renderers and tools.
//!
//! Supports Wavefront OBJ for whole-planet meshes, raw little-endian
//! buffers for GPU uploads, and PNG previews of face colors.

mod obj;
mod png;
mod raw;

use thiserror::Error;

use crate::geometry::CubeFaceId;

pub use obj::{export_planet_obj, write_planet_obj};
pub use png::{export_face_color_png, export_planet_color_png};
pub use raw::{buffer_file_names, export_face_buffers, export_planet_buffers};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("face {0:?} has no vertex colors")]
    Uncolored(CubeFaceId),
}
