//! PNG previews of face vertex colors.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageEncoder;

use super::ExportError;
use crate::terrain::{FaceMesh, Planet};

/// Writes a face's vertex colors as an R×R RGBA8 image, row y column x.
pub fn export_face_color_png(face: &FaceMesh, path: &Path) -> Result<(), ExportError> {
    if !face.is_colored() {
        return Err(ExportError::Uncolored(face.face));
    }

    let pixels: Vec<u8> = face.colors.iter().flat_map(|c| c.to_rgba8()).collect();

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(
        &pixels,
        face.resolution,
        face.resolution,
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}

/// Exports all faces as `{base_name}_{face}.png`.
pub fn export_planet_color_png(
    planet: &Planet,
    output_dir: &Path,
    base_name: &str,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir)?;

    for face in &planet.faces {
        let filename = format!("{}_{}.png", base_name, face.face.short_name());
        export_face_color_png(face, &output_dir.join(filename))?;
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
    fn test_png_pixels_match_colors() {
        let planet = small_planet(5);
        let face = planet.face(CubeFaceId::NegX);
        let dir = tempdir().unwrap();
        let path = dir.path().join("negx.png");
        export_face_color_png(face, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (5, 5));
        assert_eq!(img.get_pixel(3, 2).0, face.colors[2 * 5 + 3].to_rgba8());
    }

    #[test]
    fn test_export_planet_color_png() {
        let planet = small_planet(3);
        let dir = tempdir().unwrap();
        export_planet_color_png(&planet, dir.path(), "planet").unwrap();

        for face_id in CubeFaceId::all() {
            let path = dir.path().join(format!("planet_{}.png", face_id.short_name()));
            assert!(path.exists(), "Missing file for {:?}", face_id);
        }
    }

    #[test]
    fn test_uncolored_face_rejected() {
        let mut planet = small_planet(2);
        planet.faces[0].colors.clear();
        let dir = tempdir().unwrap();
        let err = export_face_color_png(&planet.faces[0], &dir.path().join("x.png")).unwrap_err();
        assert!(matches!(err, ExportError::Uncolored(_)));
    }
}
