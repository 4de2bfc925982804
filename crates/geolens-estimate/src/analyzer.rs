//! The seam between the pipeline and external vision/OCR engines.
//!
//! The estimation pipeline never talks to a recognition engine
//! directly; it consumes evidence through [`ImageAnalyzer`]. Each
//! method may fail independently — the extraction lanes catch analyzer
//! errors and degrade to an empty contribution.

use thiserror::Error;

/// An opaque failure from a recognition engine (timeout, model load
/// failure, malformed payload). Lanes downgrade these to empty results.
#[derive(Debug, Error)]
#[error("analyzer error: {0}")]
pub struct AnalyzerError(pub String);

/// One detected object with the vision model's own score.
#[derive(Debug, Clone)]
pub struct DetectedObject {
    pub label: String,
    /// Model score in [0, 1].
    pub score: f64,
}

/// One whole-image classification label.
#[derive(Debug, Clone)]
pub struct ImageClass {
    pub label: String,
    /// Model probability in [0, 1].
    pub probability: f64,
}

/// Coarse composition ratios over a downscaled raster.
#[derive(Debug, Clone, Copy)]
pub struct Composition {
    /// Fraction of sampled pixels classified as sky.
    pub sky_ratio: f64,
    /// Fraction of sampled pixels classified as vegetation.
    pub green_ratio: f64,
}

/// Vision and OCR capabilities consumed by the extraction lanes.
///
/// Implementations wrap whatever engines are available (a Tesseract
/// sidecar, an object-detection service, a local raster sampler). Tests
/// use plain stub implementations.
pub trait ImageAnalyzer {
    /// Recognized text, lines separated by `\n`.
    fn recognize_text(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<String, AnalyzerError>>;

    fn detect_objects(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<Vec<DetectedObject>, AnalyzerError>>;

    fn classify(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<Vec<ImageClass>, AnalyzerError>>;

    fn composition(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<Composition, AnalyzerError>>;
}
