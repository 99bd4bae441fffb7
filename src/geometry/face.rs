//! Cube face identification and per-face axes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifies one of the six faces of the cube-sphere.
///
/// Discriminants follow the fixed generation order used by
/// [`PlanetGenerator`](crate::terrain::PlanetGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CubeFaceId {
    /// +Y face (up)
    PosY = 0,
    /// -Y face (down)
    NegY = 1,
    /// -X face (left)
    NegX = 2,
    /// +X face (right)
    PosX = 3,
    /// +Z face (forward)
    PosZ = 4,
    /// -Z face (backward)
    NegZ = 5,
}

impl CubeFaceId {
    /// Returns all six cube faces in generation order.
    pub const fn all() -> [CubeFaceId; 6] {
        [
            CubeFaceId::PosY,
            CubeFaceId::NegY,
            CubeFaceId::NegX,
            CubeFaceId::PosX,
            CubeFaceId::PosZ,
            CubeFaceId::NegZ,
        ]
    }

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<CubeFaceId> {
        match index {
            0 => Some(CubeFaceId::PosY),
            1 => Some(CubeFaceId::NegY),
            2 => Some(CubeFaceId::NegX),
            3 => Some(CubeFaceId::PosX),
            4 => Some(CubeFaceId::PosZ),
            5 => Some(CubeFaceId::NegZ),
            _ => None,
        }
    }

    /// Returns a short name for the face (e.g., "posx", "negy").
    pub const fn short_name(self) -> &'static str {
        match self {
            CubeFaceId::PosX => "posx",
            CubeFaceId::NegX => "negx",
            CubeFaceId::PosY => "posy",
            CubeFaceId::NegY => "negy",
            CubeFaceId::PosZ => "posz",
            CubeFaceId::NegZ => "negz",
        }
    }

    /// Outward normal of the face ("local up").
    pub fn local_up(self) -> Vec3 {
        match self {
            CubeFaceId::PosX => Vec3::X,
            CubeFaceId::NegX => Vec3::NEG_X,
            CubeFaceId::PosY => Vec3::Y,
            CubeFaceId::NegY => Vec3::NEG_Y,
            CubeFaceId::PosZ => Vec3::Z,
            CubeFaceId::NegZ => Vec3::NEG_Z,
        }
    }

    /// First in-face axis: the components of `local_up` rotated as (y, z, x).
    pub fn axis_a(self) -> Vec3 {
        let up = self.local_up();
        Vec3::new(up.y, up.z, up.x)
    }

    /// Second in-face axis: `local_up × axis_a`.
    ///
    /// With this ordering `axis_a × axis_b == local_up`, so grid triangles
    /// wound as (x, y) → (x+1, y+1) → (x, y+1) face outward on every face.
    pub fn axis_b(self) -> Vec3 {
        self.local_up().cross(self.axis_a())
    }
}
