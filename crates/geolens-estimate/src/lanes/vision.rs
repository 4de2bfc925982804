//! Vision lane: object detections and image classes → candidates.
//!
//! Visual labels are weaker evidence than text, so the vision model's
//! own score is scaled down before it becomes a candidate prior.

use crate::analyzer::{DetectedObject, ImageAnalyzer, ImageClass};
use crate::types::{CandidateKind, LocationCandidate};

/// Object labels that indicate a place rather than an object.
const PLACE_OBJECTS: &[&str] = &[
    "building", "tower", "bridge", "church", "temple", "monument", "statue", "fountain",
    "clock", "sign",
];

/// Substrings of classification labels that indicate a place.
const PLACE_CATEGORY_TERMS: &[&str] = &[
    "building", "tower", "palace", "temple", "church", "monument", "landmark", "bridge",
    "park", "plaza", "street", "road", "avenue", "station", "airport",
];

const OBJECT_MIN_SCORE: f64 = 0.5;
pub(crate) const OBJECT_WEIGHT: f64 = 0.7;

const CLASS_MIN_PROBABILITY: f64 = 0.3;
pub(crate) const CLASS_WEIGHT: f64 = 0.6;
const CLASS_TOP_N: usize = 3;

pub(crate) async fn collect<A: ImageAnalyzer>(
    analyzer: &A,
    image: &[u8],
) -> Vec<LocationCandidate> {
    let mut candidates = Vec::new();

    match analyzer.detect_objects(image).await {
        Ok(objects) => candidates.extend(object_candidates(&objects)),
        Err(e) => {
            tracing::warn!(lane = "vision", error = %e, "object detection failed");
        }
    }

    match analyzer.classify(image).await {
        Ok(classes) => candidates.extend(class_candidates(&classes)),
        Err(e) => {
            tracing::warn!(lane = "vision", error = %e, "image classification failed");
        }
    }

    candidates
}

/// Keeps place-indicative detections above the score floor.
pub(crate) fn object_candidates(objects: &[DetectedObject]) -> Vec<LocationCandidate> {
    objects
        .iter()
        .filter(|o| o.score > OBJECT_MIN_SCORE)
        .filter(|o| PLACE_OBJECTS.contains(&o.label.to_lowercase().as_str()))
        .map(|o| {
            LocationCandidate::bare(
                o.label.clone(),
                CandidateKind::Object,
                o.score * OBJECT_WEIGHT,
                "object-detection",
            )
        })
        .collect()
}

/// Keeps the top classification labels whose text mentions a place term.
pub(crate) fn class_candidates(classes: &[ImageClass]) -> Vec<LocationCandidate> {
    classes
        .iter()
        .take(CLASS_TOP_N)
        .filter(|c| c.probability > CLASS_MIN_PROBABILITY)
        .filter(|c| {
            let lower = c.label.to_lowercase();
            PLACE_CATEGORY_TERMS.iter().any(|term| lower.contains(term))
        })
        .map(|c| {
            LocationCandidate::bare(
                c.label.clone(),
                CandidateKind::Category,
                c.probability * CLASS_WEIGHT,
                "classification",
            )
        })
        .collect()
}
