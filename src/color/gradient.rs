//! Elevation → color gradients.

use crate::error::PlanetError;
use super::palette::{BiomePalette, Rgba, PALETTE_SIZE};

/// Relative stop positions across the elevation range.
pub const STOP_FRACTIONS: [f32; PALETTE_SIZE] = [0.0, 0.1667, 0.2167, 0.5, 0.667, 1.0];

/// One gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgba,
}

/// Six stops spread over one elevation range.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradient {
    stops: [GradientStop; PALETTE_SIZE],
}

impl ColorGradient {
    /// Spreads `palette` over `[min_elevation, max_elevation]`.
    ///
    /// `max == min` is allowed and yields a collapsed gradient.
    pub fn build(
        palette: &BiomePalette,
        min_elevation: f32,
        max_elevation: f32,
    ) -> Result<Self, PlanetError> {
        if !min_elevation.is_finite() || !max_elevation.is_finite() {
            return Err(PlanetError::ColorMapping(format!(
                "non-finite elevation range [{}, {}]",
                min_elevation, max_elevation
            )));
        }
        if max_elevation < min_elevation {
            return Err(PlanetError::ColorMapping(format!(
                "elevation max {} is below min {}",
                max_elevation, min_elevation
            )));
        }

        let span = max_elevation - min_elevation;
        let mut stops = [GradientStop { position: min_elevation, color: Rgba::default() }; PALETTE_SIZE];
        for ((stop, fraction), color) in stops.iter_mut().zip(STOP_FRACTIONS).zip(palette.colors) {
            *stop = GradientStop {
                position: min_elevation + fraction * span,
                color,
            };
        }
        // The last stop is the range end exactly, not min + 1.0 * span.
        stops[PALETTE_SIZE - 1].position = max_elevation;

        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[GradientStop; PALETTE_SIZE] {
        &self.stops
    }

    /// True when every stop sits at the same elevation.
    pub fn is_collapsed(&self) -> bool {
        self.stops[0].position == self.stops[PALETTE_SIZE - 1].position
    }

    /// Color for an elevation.
    ///
    /// The first stop pair whose closed interval contains `elevation` is
    /// interpolated. Anything outside every pair, below the first stop
    /// included, gets the last stop's color. A collapsed gradient always
    /// returns the last color.
    pub fn color_for(&self, elevation: f32) -> Rgba {
        let fallback = self.stops[PALETTE_SIZE - 1].color;
        if self.is_collapsed() {
            return fallback;
        }

        for pair in self.stops.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if elevation >= lower.position && elevation <= upper.position {
                let width = upper.position - lower.position;
                if width <= 0.0 {
                    return fallback;
                }
                let t = (elevation - lower.position) / width;
                return lower.color.lerp(upper.color, t);
            }
        }

        fallback
    }
}
