//! Wavefront OBJ export with per-vertex colors.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ExportError;
use crate::terrain::Planet;

/// Writes every face of `planet` into one OBJ file.
///
/// Each face becomes an object named `face_{short_name}`. Vertex lines
/// carry the color as `v x y z r g b`; faces reference positions and
/// normals with 1-based indices offset across objects.
pub fn export_planet_obj(planet: &Planet, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_planet_obj(planet, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Streams the OBJ text for `planet` into any writer.
pub fn write_planet_obj<W: Write>(planet: &Planet, writer: &mut W) -> Result<(), ExportError> {
    writeln!(
        writer,
        "# planetgen: radius {} resolution {} ({} vertices, {} triangles)",
        planet.radius,
        planet.resolution,
        planet.vertex_count(),
        planet.triangle_count()
    )?;

    let mut offset: u32 = 1;
    for face in &planet.faces {
        if !face.is_colored() {
            return Err(ExportError::Uncolored(face.face));
        }
        writeln!(writer, "o face_{}", face.face.short_name())?;
        for (p, c) in face.positions.iter().zip(&face.colors) {
            writeln!(writer, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.r, c.g, c.b)?;
        }
        for n in &face.normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for tri in face.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + offset, tri[1] + offset, tri[2] + offset);
            writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        offset += face.vertex_count() as u32;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::small_planet;
    use tempfile::tempdir;

    #[test]
    fn test_obj_counts() {
        let planet = small_planet(3);
        let mut out = Vec::new();
        write_planet_obj(&planet, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("o "), 6);
        assert_eq!(count("v "), 6 * 9);
        assert_eq!(count("vn "), 6 * 9);
        assert_eq!(count("f "), 6 * 8);
        assert!(text.contains("o face_posy"));
        assert!(text.contains("o face_negz"));
    }

    #[test]
    fn test_face_indices_are_offset() {
        let planet = small_planet(2);
        let mut out = Vec::new();
        write_planet_obj(&planet, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        // first triangle of the first face: (0, 3, 2) in 1-based form
        assert_eq!(faces[0], "f 1//1 4//4 3//3");
        // second object starts after four vertices
        assert_eq!(faces[2], "f 5//5 8//8 7//7");

        let max_index = faces
            .iter()
            .flat_map(|l| l.split_whitespace().skip(1))
            .map(|v| v.split("//").next().unwrap().parse::<u32>().unwrap())
            .max()
            .unwrap();
        assert_eq!(max_index, 24);
    }

    #[test]
    fn test_uncolored_face_rejected() {
        let mut planet = small_planet(2);
        planet.faces[1].colors.clear();
        let mut out = Vec::new();
        let err = write_planet_obj(&planet, &mut out).unwrap_err();
        assert!(matches!(err, ExportError::Uncolored(id) if id == planet.faces[1].face));
    }

    #[test]
    fn test_export_planet_obj_file() {
        let planet = small_planet(4);
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("planet.obj");
        export_planet_obj(&planet, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
