//! Displaced grid mesh for one cube face.

use glam::Vec3;

use crate::color::{ColorGradient, Rgba};
use crate::error::PlanetError;
use crate::geometry::{CubeFaceId, FaceCoord};
use crate::noise::NoiseSource;
use super::shape::{ElevationTracker, PlanetShape};

/// Geometry and vertex colors of one face, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMesh {
    /// Which face of the cube this represents.
    pub face: CubeFaceId,
    /// Vertices per grid side.
    pub resolution: u32,
    /// Displaced vertex positions, row-major (`x + y * resolution`).
    pub positions: Vec<Vec3>,
    /// Smoothed unit normals, parallel to `positions`.
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// Vertex colors, parallel to `positions`. Empty until colored.
    pub colors: Vec<Rgba>,
    /// Elevation of each vertex in recording order. Empty until colored.
    pub elevations: Vec<f32>,
}

impl FaceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_colored(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` buffer.
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat `[x, y, z, ...]` buffer.
    pub fn normal_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Colors as a flat `[r, g, b, a, ...]` buffer.
    pub fn color_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Colors every vertex from the elevations recorded while it was built.
    pub fn apply_colors(
        &mut self,
        gradient: &ColorGradient,
        elevations: &[f32],
    ) -> Result<(), PlanetError> {
        if elevations.len() != self.positions.len() {
            return Err(PlanetError::ColorMapping(format!(
                "face {:?} has {} vertices but {} recorded elevations",
                self.face,
                self.positions.len(),
                elevations.len()
            )));
        }
        self.colors = elevations.iter().map(|&e| gradient.color_for(e)).collect();
        self.elevations = elevations.to_vec();
        Ok(())
    }

    /// Min/max of the stored elevations.
    pub fn elevation_range(&self) -> Option<(f32, f32)> {
        if self.elevations.is_empty() {
            return None;
        }
        let min = self.elevations.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = self.elevations.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        Some((min, max))
    }
}

/// Largest grid side whose vertex indices still fit a `u32` index buffer.
pub const MAX_RESOLUTION: u32 = u16::MAX as u32;

/// Accepts `2..=MAX_RESOLUTION` vertices per face side.
pub fn check_resolution(resolution: u32) -> Result<(), PlanetError> {
    if resolution < 2 {
        return Err(PlanetError::invalid(format!(
            "resolution must be at least 2, got {}",
            resolution
        )));
    }
    if resolution > MAX_RESOLUTION {
        return Err(PlanetError::invalid(format!(
            "resolution must be at most {}, got {}",
            MAX_RESOLUTION, resolution
        )));
    }
    Ok(())
}

/// Number of indices in a face triangle list: `6 * (resolution - 1)²`.
pub fn index_count(resolution: u32) -> usize {
    let cells = resolution.saturating_sub(1) as usize;
    6 * cells * cells
}

/// Builds one displaced face.
///
/// Every vertex elevation is recorded into `tracker` in vertex order. The
/// returned mesh has no colors yet. On error nothing is returned for the
/// face; `tracker` may hold a partial record and should be reset.
pub fn build_face_mesh<S: NoiseSource>(
    face: CubeFaceId,
    resolution: u32,
    shape: &PlanetShape<S>,
    tracker: &mut ElevationTracker,
) -> Result<FaceMesh, PlanetError> {
    check_resolution(resolution)?;

    let res = resolution as usize;
    let vertex_count = res * res;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut directions = Vec::with_capacity(vertex_count);

    for y in 0..resolution {
        for x in 0..resolution {
            let point_on_sphere = FaceCoord::from_grid(face, x, y, resolution).to_sphere_point();
            let elevation = shape.elevation_at(point_on_sphere).map_err(|fault| {
                PlanetError::Generation {
                    face,
                    layer: Some(fault.layer),
                    reason: format!("non-finite noise value {} at vertex ({}, {})", fault.value, x, y),
                }
            })?;
            if !elevation.is_finite() {
                return Err(PlanetError::Generation {
                    face,
                    layer: None,
                    reason: format!("non-finite elevation {} at vertex ({}, {})", elevation, x, y),
                });
            }
            tracker.record(elevation);
            positions.push(point_on_sphere * elevation);
            directions.push(point_on_sphere);
        }
    }

    let indices = grid_indices(resolution);
    let normals = smooth_normals(&positions, &indices, &directions).map_err(|vertex| {
        PlanetError::Generation {
            face,
            layer: None,
            reason: format!("non-finite normal at vertex {}", vertex),
        }
    })?;

    log::trace!("built face {:?}: {} vertices", face, positions.len());

    Ok(FaceMesh {
        face,
        resolution,
        positions,
        normals,
        indices,
        colors: Vec::new(),
        elevations: Vec::new(),
    })
}

/// Two triangles per grid cell, wound outward given the face axes.
pub fn grid_indices(resolution: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(index_count(resolution));
    if resolution < 2 {
        return indices;
    }
    let r = resolution;
    for y in 0..r - 1 {
        for x in 0..r - 1 {
            let i = x + y * r;
            indices.extend_from_slice(&[i, i + r + 1, i + r]);
            indices.extend_from_slice(&[i, i + 1, i + r + 1]);
        }
    }
    indices
}

/// Area-weighted vertex normals.
///
/// A vertex whose accumulated normal has zero length takes its entry in
/// `fallback` instead. Returns the offending vertex index if a normal is
/// not finite.
pub fn smooth_normals(
    positions: &[Vec3],
    indices: &[u32],
    fallback: &[Vec3],
) -> Result<Vec<Vec3>, usize> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        accum[a] += n;
        accum[b] += n;
        accum[c] += n;
    }

    accum
        .into_iter()
        .enumerate()
        .map(|(i, n)| {
            if !n.is_finite() {
                return Err(i);
            }
            match n.try_normalize() {
                Some(unit) => Ok(unit),
                None => Ok(fallback[i]),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{ConstantSource, NoiseLayer, NoiseLayerSettings, Seed};

    fn default_shape() -> PlanetShape {
        let layers = vec![
            NoiseLayer::new(NoiseLayerSettings::continents()),
            NoiseLayer::new(NoiseLayerSettings::masked_hills()),
            NoiseLayer::new(NoiseLayerSettings::masked_ridges()),
        ];
        PlanetShape::new(Seed::from("mesh"), 2.0, layers).unwrap()
    }

    fn rolling_shape() -> PlanetShape {
        let layers = vec![NoiseLayer::new(NoiseLayerSettings {
            num_layers: 3,
            use_as_layer_mask: true,
            strength: 0.2,
            ..Default::default()
        })];
        PlanetShape::new(Seed::from("hills"), 1.0, layers).unwrap()
    }

    fn flat_shape(radius: f32) -> PlanetShape<ConstantSource> {
        PlanetShape::with_source(Seed::from(0), ConstantSource(0.0), radius, Vec::new()).unwrap()
    }

    #[test]
    fn test_check_resolution_bounds() {
        assert!(check_resolution(1).is_err());
        assert!(check_resolution(2).is_ok());
        assert!(check_resolution(MAX_RESOLUTION).is_ok());
        let err = check_resolution(MAX_RESOLUTION + 1).unwrap_err();
        assert!(matches!(err, PlanetError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_resolution_two_is_one_quad() {
        let mut tracker = ElevationTracker::new();
        let mesh = build_face_mesh(CubeFaceId::PosZ, 2, &flat_shape(1.0), &mut tracker).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 3, 2, 0, 1, 3]);
    }

    #[test]
    fn test_resolution_below_two_rejected() {
        for res in [0, 1] {
            let mut tracker = ElevationTracker::new();
            let err = build_face_mesh(CubeFaceId::PosX, res, &flat_shape(1.0), &mut tracker).unwrap_err();
            assert!(matches!(err, PlanetError::InvalidConfiguration(_)));
            assert!(tracker.is_pristine());
        }
    }

    #[test]
    fn test_index_buffer_validity() {
        let res = 7;
        let mut tracker = ElevationTracker::new();
        let mesh = build_face_mesh(CubeFaceId::NegY, res, &default_shape(), &mut tracker).unwrap();
        assert_eq!(mesh.indices.len(), 6 * (res as usize - 1).pow(2));
        assert_eq!(mesh.indices.len(), index_count(res));
        let limit = res * res;
        assert!(mesh.indices.iter().all(|&i| i < limit));
    }

    #[test]
    fn test_flat_shape_sits_at_radius() {
        let mut tracker = ElevationTracker::new();
        let mesh = build_face_mesh(CubeFaceId::NegX, 5, &flat_shape(2.5), &mut tracker).unwrap();
        assert!(tracker.elevations().iter().all(|&e| e == 2.5));
        for p in &mesh.positions {
            assert!((p.length() - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tracker_records_every_vertex_in_order() {
        let shape = default_shape();
        let mut tracker = ElevationTracker::new();
        let mesh = build_face_mesh(CubeFaceId::PosY, 6, &shape, &mut tracker).unwrap();
        assert_eq!(tracker.len(), mesh.vertex_count());
        for (p, &e) in mesh.positions.iter().zip(tracker.elevations()) {
            assert!((p.length() - e).abs() < 1e-4);
            assert!(e >= tracker.min() && e <= tracker.max());
        }
    }

    #[test]
    fn test_normals_point_outward_on_every_face() {
        let shape = rolling_shape();
        for face in CubeFaceId::all() {
            let mut tracker = ElevationTracker::new();
            let mesh = build_face_mesh(face, 8, &shape, &mut tracker).unwrap();
            for (n, p) in mesh.normals.iter().zip(&mesh.positions) {
                assert!((n.length() - 1.0).abs() < 1e-4);
                assert!(n.dot(p.normalize()) > 0.0, "{:?}: normal {:?} at {:?}", face, n, p);
            }
        }
    }

    #[test]
    fn test_triangles_wind_outward() {
        let mut tracker = ElevationTracker::new();
        for face in CubeFaceId::all() {
            tracker.reset();
            let mesh = build_face_mesh(face, 3, &flat_shape(1.0), &mut tracker).unwrap();
            for tri in mesh.indices.chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
                let n = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                assert!(n.dot(centroid) > 0.0, "{:?} triangle {:?} faces inward", face, tri);
            }
        }
    }

    #[test]
    fn test_zero_length_normal_uses_fallback() {
        let positions = vec![Vec3::ZERO; 3];
        let fallback = vec![Vec3::X, Vec3::Y, Vec3::Z];
        let normals = smooth_normals(&positions, &[0, 1, 2], &fallback).unwrap();
        assert_eq!(normals, fallback);
    }

    #[test]
    fn test_non_finite_normal_is_reported() {
        let positions = vec![Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0), Vec3::Y];
        let fallback = vec![Vec3::X; 3];
        assert!(smooth_normals(&positions, &[0, 1, 2], &fallback).is_err());
    }

    #[test]
    fn test_non_finite_noise_aborts_face() {
        let layers = vec![
            NoiseLayer::new(NoiseLayerSettings::default()),
            NoiseLayer::new(NoiseLayerSettings { num_layers: 1, strength: f32::MAX, ..Default::default() }),
            NoiseLayer::new(NoiseLayerSettings { num_layers: 1, strength: f32::MAX, ..Default::default() }),
        ];
        let shape = PlanetShape::with_source(Seed::from(0), ConstantSource(1.0), 1.0, layers).unwrap();
        let mut tracker = ElevationTracker::new();
        let err = build_face_mesh(CubeFaceId::PosZ, 4, &shape, &mut tracker).unwrap_err();
        match err {
            PlanetError::Generation { face, layer, .. } => {
                assert_eq!(face, CubeFaceId::PosZ);
                assert_eq!(layer, Some(2));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_flat_buffers() {
        let mut tracker = ElevationTracker::new();
        let shape = flat_shape(1.0);
        let mut mesh = build_face_mesh(CubeFaceId::PosX, 3, &shape, &mut tracker).unwrap();
        assert_eq!(mesh.position_buffer().len(), 27);
        assert_eq!(mesh.normal_buffer().len(), 27);
        assert_eq!(mesh.position_buffer()[0], mesh.positions[0].x);

        let gradient = ColorGradient::build(&crate::color::BiomePalette::earth(), 1.0, 1.0).unwrap();
        mesh.apply_colors(&gradient, tracker.elevations()).unwrap();
        assert_eq!(mesh.color_buffer().len(), 36);
        assert_eq!(mesh.elevation_range(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_apply_colors_length_mismatch() {
        let mut tracker = ElevationTracker::new();
        let mut mesh = build_face_mesh(CubeFaceId::PosX, 3, &flat_shape(1.0), &mut tracker).unwrap();
        let gradient = ColorGradient::build(&crate::color::BiomePalette::earth(), 0.0, 1.0).unwrap();
        let err = mesh.apply_colors(&gradient, &[0.5; 4]).unwrap_err();
        assert!(matches!(err, PlanetError::ColorMapping(_)));
    }
}
