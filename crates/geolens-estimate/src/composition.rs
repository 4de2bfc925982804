//! Coarse composition analysis over downscaled raster samples.
//!
//! Classifies sampled pixels into sky (dominant blue above a brightness
//! floor) and vegetation (dominant green) and derives weak urban/nature
//! hints from the ratios. These are the lowest-confidence candidates in
//! the pipeline — a scene-type prior, not a place.

use crate::analyzer::Composition;
use crate::types::{CandidateKind, LocationCandidate};

/// Sky and green pixel ratios over an RGBA sample buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionStats {
    pub sky_ratio: f64,
    pub green_ratio: f64,
}

impl CompositionStats {
    /// Computes ratios from packed RGBA bytes (4 bytes per pixel, alpha
    /// ignored). Trailing partial pixels are ignored. An empty buffer
    /// yields zero ratios.
    #[must_use]
    pub fn from_rgba(pixels: &[u8]) -> Self {
        let mut sky = 0usize;
        let mut green = 0usize;
        let mut total = 0usize;

        for px in pixels.chunks_exact(4) {
            let (r, g, b) = (px[0], px[1], px[2]);
            if b > r && b > g && b > 150 {
                sky += 1;
            }
            if g > r && g > b && g > 100 {
                green += 1;
            }
            total += 1;
        }

        if total == 0 {
            return Self {
                sky_ratio: 0.0,
                green_ratio: 0.0,
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let denom = total as f64;
        #[allow(clippy::cast_precision_loss)]
        let (sky_ratio, green_ratio) = (sky as f64 / denom, green as f64 / denom);
        Self {
            sky_ratio,
            green_ratio,
        }
    }
}

impl From<CompositionStats> for Composition {
    fn from(stats: CompositionStats) -> Self {
        Self {
            sky_ratio: stats.sky_ratio,
            green_ratio: stats.green_ratio,
        }
    }
}

/// Little sky and little green reads as a built-up scene.
const URBAN_SKY_MAX: f64 = 0.3;
const URBAN_GREEN_MAX: f64 = 0.3;
/// Green above this reads as a natural scene.
const NATURE_GREEN_MIN: f64 = 0.2;

pub(crate) const URBAN_CONFIDENCE: f64 = 0.5;
pub(crate) const NATURE_CONFIDENCE: f64 = 0.4;

/// Derives scene-type hints from composition ratios. Both hints can
/// fire for the same image.
pub(crate) fn composition_candidates(composition: &Composition) -> Vec<LocationCandidate> {
    let mut hints = Vec::new();

    if composition.sky_ratio < URBAN_SKY_MAX && composition.green_ratio < URBAN_GREEN_MAX {
        hints.push(LocationCandidate::bare(
            "city buildings",
            CandidateKind::Visual,
            URBAN_CONFIDENCE,
            "composition",
        ));
    }
    if composition.green_ratio > NATURE_GREEN_MIN {
        hints.push(LocationCandidate::bare(
            "natural landscape",
            CandidateKind::Visual,
            NATURE_CONFIDENCE,
            "composition",
        ));
    }

    hints
}
