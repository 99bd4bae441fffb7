//! Coordinate conversion utilities for cube-sphere mapping.

use glam::Vec3;
use super::face::CubeFaceId;

/// A grid coordinate on a cube face, expressed as fractions in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct FaceCoord {
    /// The cube face this coordinate belongs to.
    pub face: CubeFaceId,
    /// Fraction along `axis_a`, in [0, 1].
    pub u: f32,
    /// Fraction along `axis_b`, in [0, 1].
    pub v: f32,
}

impl FaceCoord {
    /// Creates a new face coordinate.
    pub fn new(face: CubeFaceId, u: f32, v: f32) -> Self {
        Self { face, u, v }
    }

    /// Grid coordinate of vertex (x, y) on a face with `resolution` vertices per side.
    ///
    /// `resolution` must be at least 2; the mesh builder rejects anything smaller.
    pub fn from_grid(face: CubeFaceId, x: u32, y: u32, resolution: u32) -> Self {
        let steps = (resolution - 1) as f32;
        Self::new(face, x as f32 / steps, y as f32 / steps)
    }

    /// Converts this face coordinate to a point on the unit sphere.
    pub fn to_sphere_point(self) -> Vec3 {
        cube_to_sphere(face_uv_to_cube(self.face, self.u, self.v))
    }
}

/// Converts fractions on a face to a point on the surface of the cube [-1, 1]³.
///
/// `local_up + axis_a * (2u - 1) + axis_b * (2v - 1)`
pub fn face_uv_to_cube(face: CubeFaceId, u: f32, v: f32) -> Vec3 {
    // Map [0, 1] to [-1, 1]
    let s = u * 2.0 - 1.0;
    let t = v * 2.0 - 1.0;

    face.local_up() + face.axis_a() * s + face.axis_b() * t
}

/// Projects a cube point onto the unit sphere by normalization.
pub fn cube_to_sphere(cube_point: Vec3) -> Vec3 {
    cube_point.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_uv_to_cube_centers() {
        for face in CubeFaceId::all() {
            let cube_point = face_uv_to_cube(face, 0.5, 0.5);
            assert!(
                (cube_point - face.local_up()).length() < 1e-6,
                "Face {:?} center: expected {:?}, got {:?}",
                face,
                face.local_up(),
                cube_point
            );
        }
    }

    #[test]
    fn test_face_corners_lie_on_cube() {
        for face in CubeFaceId::all() {
            for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                let p = face_uv_to_cube(face, u, v);
                let abs = p.abs();
                assert!((abs.x - 1.0).abs() < 1e-6);
                assert!((abs.y - 1.0).abs() < 1e-6);
                assert!((abs.z - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_sphere_points_are_unit_length() {
        for face in CubeFaceId::all() {
            for y in 0..5 {
                for x in 0..5 {
                    let p = FaceCoord::from_grid(face, x, y, 5).to_sphere_point();
                    assert!((p.length() - 1.0).abs() < 1e-5, "{:?} ({}, {})", face, x, y);
                }
            }
        }
    }

    #[test]
    fn test_from_grid_endpoints() {
        let c = FaceCoord::from_grid(CubeFaceId::PosZ, 0, 9, 10);
        assert_eq!(c.u, 0.0);
        assert_eq!(c.v, 1.0);
    }

    #[test]
    fn test_pos_y_edge_meets_pos_x() {
        // The u=1 edge of +Y is the cube edge x = y = 1, shared with +X.
        for i in 0..5 {
            let p = FaceCoord::new(CubeFaceId::PosY, 1.0, i as f32 / 4.0).to_sphere_point();
            assert!(p.x > 0.0);
            assert!((p.x - p.y).abs() < 1e-6, "edge point {:?} not on x == y", p);
        }
    }
}
