//! Six-face planet assembly.

use serde::{Deserialize, Serialize};

use crate::color::{BiomePalette, ColorGradient};
use crate::error::PlanetError;
use crate::geometry::CubeFaceId;
use crate::noise::{NoiseSource, SimplexSource};
use super::mesh::{build_face_mesh, check_resolution, FaceMesh};
use super::shape::{merge_ranges, ElevationTracker, PlanetShape};

/// Elevation range each face's color gradient is normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientScope {
    /// Each face against its own min/max. Adjacent faces can show color seams.
    #[default]
    PerFace,
    /// Every face against the planet-wide min/max.
    Global,
}

/// Which palette colors which face.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteAssignment {
    /// One palette for the whole planet.
    Global(BiomePalette),
    /// One palette per face, indexed by [`CubeFaceId::index`].
    PerFace(Box<[BiomePalette; 6]>),
}

impl PaletteAssignment {
    pub fn for_face(&self, face: CubeFaceId) -> &BiomePalette {
        match self {
            PaletteAssignment::Global(palette) => palette,
            PaletteAssignment::PerFace(palettes) => &palettes[face.index()],
        }
    }
}

/// A generated planet: six colored face meshes in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    /// Planet base radius.
    pub radius: f32,
    /// Vertices per face side.
    pub resolution: u32,
    /// Scope used for the color gradients.
    pub gradient_scope: GradientScope,
    /// Face meshes, indexed by [`CubeFaceId::index`].
    pub faces: Vec<FaceMesh>,
}

impl Planet {
    /// Returns a reference to a specific face.
    pub fn face(&self, id: CubeFaceId) -> &FaceMesh {
        &self.faces[id.index()]
    }

    /// Computes the global min and max elevation across all faces.
    pub fn elevation_range(&self) -> Option<(f32, f32)> {
        merge_ranges(self.faces.iter().map(FaceMesh::elevation_range))
    }

    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(FaceMesh::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(FaceMesh::triangle_count).sum()
    }
}

/// Builds and colors all six faces of a planet.
#[derive(Debug, Clone)]
pub struct PlanetGenerator<S = SimplexSource> {
    shape: PlanetShape<S>,
    palettes: PaletteAssignment,
    resolution: u32,
    gradient_scope: GradientScope,
}

impl<S: NoiseSource> PlanetGenerator<S> {
    /// Validates the resolution up front so no face is ever partially built.
    pub fn new(
        shape: PlanetShape<S>,
        palettes: PaletteAssignment,
        resolution: u32,
    ) -> Result<Self, PlanetError> {
        check_resolution(resolution)?;
        Ok(Self {
            shape,
            palettes,
            resolution,
            gradient_scope: GradientScope::PerFace,
        })
    }

    pub fn with_gradient_scope(mut self, scope: GradientScope) -> Self {
        self.gradient_scope = scope;
        self
    }

    pub fn shape(&self) -> &PlanetShape<S> {
        &self.shape
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn gradient_scope(&self) -> GradientScope {
        self.gradient_scope
    }

    /// Generates the planet in the fixed face order.
    pub fn generate(&self) -> Result<Planet, PlanetError> {
        let faces = match self.gradient_scope {
            GradientScope::PerFace => self.generate_per_face()?,
            GradientScope::Global => self.generate_global()?,
        };

        let planet = Planet {
            radius: self.shape.radius(),
            resolution: self.resolution,
            gradient_scope: self.gradient_scope,
            faces,
        };
        if let Some((min, max)) = planet.elevation_range() {
            log::info!(
                "generated planet (seed {}): {} vertices, {} triangles, elevation [{:.4}, {:.4}]",
                self.shape.seed(),
                planet.vertex_count(),
                planet.triangle_count(),
                min,
                max
            );
        }
        Ok(planet)
    }

    /// Build → gradient from this face's extrema → color → reset, face by face.
    fn generate_per_face(&self) -> Result<Vec<FaceMesh>, PlanetError> {
        let res = self.resolution as usize;
        let mut tracker = ElevationTracker::with_capacity(res * res);
        let mut faces = Vec::with_capacity(6);

        for face in CubeFaceId::all() {
            let mut mesh = build_face_mesh(face, self.resolution, &self.shape, &mut tracker)?;
            let (min, max) = tracker
                .range()
                .ok_or_else(|| PlanetError::ColorMapping(format!("no elevations recorded for {:?}", face)))?;
            log::debug!("face {:?}: elevation [{:.4}, {:.4}]", face, min, max);

            let gradient = ColorGradient::build(self.palettes.for_face(face), min, max)?;
            mesh.apply_colors(&gradient, tracker.elevations())?;
            tracker.reset();
            faces.push(mesh);
        }

        Ok(faces)
    }

    /// Build every face with its own tracker, then color all against the merged range.
    fn generate_global(&self) -> Result<Vec<FaceMesh>, PlanetError> {
        let mut built = Vec::with_capacity(6);
        for face in CubeFaceId::all() {
            let mut tracker = ElevationTracker::new();
            let mesh = build_face_mesh(face, self.resolution, &self.shape, &mut tracker)?;
            log::debug!("face {:?}: elevation {:?}", face, tracker.range());
            built.push((mesh, tracker));
        }

        let (min, max) = merge_ranges(built.iter().map(|(_, t)| t.range()))
            .ok_or_else(|| PlanetError::ColorMapping("no elevations recorded".to_string()))?;
        log::debug!("global elevation [{:.4}, {:.4}]", min, max);

        let mut faces = Vec::with_capacity(6);
        for (mut mesh, tracker) in built {
            let gradient = ColorGradient::build(self.palettes.for_face(mesh.face), min, max)?;
            mesh.apply_colors(&gradient, tracker.elevations())?;
            faces.push(mesh);
        }
        Ok(faces)
    }
}
