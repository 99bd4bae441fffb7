//! Raw little-endian buffer export for GPU uploads.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ExportError;
use crate::terrain::{FaceMesh, Planet};

/// Paths written for one face: positions, normals, colors, indices.
pub fn buffer_file_names(face: &FaceMesh, output_dir: &Path, base_name: &str) -> [PathBuf; 4] {
    let stem = format!("{}_{}", base_name, face.face.short_name());
    [
        output_dir.join(format!("{}.pos.f32", stem)),
        output_dir.join(format!("{}.nrm.f32", stem)),
        output_dir.join(format!("{}.col.f32", stem)),
        output_dir.join(format!("{}.idx.u32", stem)),
    ]
}

fn write_f32s(path: &Path, values: &[f32]) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for v in values {
        writer.write_all(&v.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_u32s(path: &Path, values: &[u32]) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for v in values {
        writer.write_all(&v.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Exports one face as four flat buffers.
///
/// Positions and normals are 3 floats per vertex, colors 4 floats per
/// vertex, indices 3 `u32` per triangle.
pub fn export_face_buffers(
    face: &FaceMesh,
    output_dir: &Path,
    base_name: &str,
) -> Result<(), ExportError> {
    if !face.is_colored() {
        return Err(ExportError::Uncolored(face.face));
    }
    let [pos, nrm, col, idx] = buffer_file_names(face, output_dir, base_name);
    write_f32s(&pos, face.position_buffer())?;
    write_f32s(&nrm, face.normal_buffer())?;
    write_f32s(&col, face.color_buffer())?;
    write_u32s(&idx, &face.indices)?;
    Ok(())
}

/// Exports all six faces, named `{base_name}_{face}.*`.
pub fn export_planet_buffers(
    planet: &Planet,
    output_dir: &Path,
    base_name: &str,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir)?;

    for face in &planet.faces {
        export_face_buffers(face, output_dir, base_name)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::small_planet;
    use crate::geometry::CubeFaceId;
    use tempfile::tempdir;

    #[test]
    fn test_buffer_sizes() {
        let planet = small_planet(4);
        let face = planet.face(CubeFaceId::PosX);
        let dir = tempdir().unwrap();
        export_face_buffers(face, dir.path(), "p").unwrap();

        let [pos, nrm, col, idx] = buffer_file_names(face, dir.path(), "p");
        let len = |p: &Path| std::fs::metadata(p).unwrap().len();
        assert_eq!(len(&pos), 16 * 3 * 4);
        assert_eq!(len(&nrm), 16 * 3 * 4);
        assert_eq!(len(&col), 16 * 4 * 4);
        assert_eq!(len(&idx), 9 * 2 * 3 * 4);
    }

    #[test]
    fn test_buffer_content() {
        let planet = small_planet(2);
        let face = planet.face(CubeFaceId::PosY);
        let dir = tempdir().unwrap();
        export_face_buffers(face, dir.path(), "p").unwrap();

        let [pos, _, _, idx] = buffer_file_names(face, dir.path(), "p");
        let bytes = std::fs::read(pos).unwrap();
        let x0 = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(x0, face.positions[0].x);

        let bytes = std::fs::read(idx).unwrap();
        let indices: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(indices, face.indices);
    }

    #[test]
    fn test_export_planet_buffers() {
        let planet = small_planet(3);
        let dir = tempdir().unwrap();
        export_planet_buffers(&planet, dir.path(), "world").unwrap();

        for face_id in CubeFaceId::all() {
            let path = dir.path().join(format!("world_{}.idx.u32", face_id.short_name()));
            assert!(path.exists(), "Missing file for {:?}", face_id);
        }
    }
}
