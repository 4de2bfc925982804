//! Evidence extraction lanes.
//!
//! Three lanes (text, vision, composition) run concurrently per image.
//! A lane that fails contributes an empty list and a warning — lane
//! isolation is the extractor's core guarantee. The landmark post-pass
//! and the candidate cap run after the lanes join.

pub(crate) mod text;
pub(crate) mod vision;

use crate::analyzer::ImageAnalyzer;
use crate::composition::composition_candidates;
use crate::landmark::landmark_candidates;
use crate::types::LocationCandidate;

/// Upper bound on the candidate list handed to the ranker.
pub(crate) const MAX_CANDIDATES: usize = 8;

/// Extracts location candidates from one image.
///
/// Lane outputs are concatenated strongest-evidence-first (text, then
/// landmark hits derived from it, then vision, then composition) and
/// capped to [`MAX_CANDIDATES`]. Never fails: the worst outcome is an
/// empty list.
pub async fn extract_candidates<A: ImageAnalyzer>(
    analyzer: &A,
    image: &[u8],
) -> Vec<LocationCandidate> {
    let (text, vision, composition) = tokio::join!(
        text::collect(analyzer, image),
        vision::collect(analyzer, image),
        composition_lane(analyzer, image),
    );

    let landmarks = landmark_candidates(&text);

    let mut candidates = text;
    candidates.extend(landmarks);
    candidates.extend(vision);
    candidates.extend(composition);
    candidates.truncate(MAX_CANDIDATES);

    tracing::debug!(count = candidates.len(), "extracted location candidates");
    candidates
}

async fn composition_lane<A: ImageAnalyzer>(
    analyzer: &A,
    image: &[u8],
) -> Vec<LocationCandidate> {
    match analyzer.composition(image).await {
        Ok(composition) => composition_candidates(&composition),
        Err(e) => {
            tracing::warn!(lane = "composition", error = %e, "composition analysis failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerError, Composition, DetectedObject, ImageClass};
    use crate::types::CandidateKind;

    /// Stub analyzer: `None` fields simulate a failing engine.
    struct StubAnalyzer {
        text: Option<String>,
        objects: Option<Vec<DetectedObject>>,
        classes: Option<Vec<ImageClass>>,
        composition: Option<Composition>,
    }

    impl StubAnalyzer {
        fn failing() -> Self {
            Self {
                text: None,
                objects: None,
                classes: None,
                composition: None,
            }
        }
    }

    impl ImageAnalyzer for StubAnalyzer {
        async fn recognize_text(&self, _image: &[u8]) -> Result<String, AnalyzerError> {
            self.text
                .clone()
                .ok_or_else(|| AnalyzerError("ocr down".to_string()))
        }

        async fn detect_objects(&self, _image: &[u8]) -> Result<Vec<DetectedObject>, AnalyzerError> {
            self.objects
                .clone()
                .ok_or_else(|| AnalyzerError("detector down".to_string()))
        }

        async fn classify(&self, _image: &[u8]) -> Result<Vec<ImageClass>, AnalyzerError> {
            self.classes
                .clone()
                .ok_or_else(|| AnalyzerError("classifier down".to_string()))
        }

        async fn composition(&self, _image: &[u8]) -> Result<Composition, AnalyzerError> {
            self.composition
                .ok_or_else(|| AnalyzerError("sampler down".to_string()))
        }
    }

    #[tokio::test]
    async fn failing_lane_does_not_block_the_others() {
        let analyzer = StubAnalyzer {
            text: None, // OCR down
            objects: Some(vec![DetectedObject {
                label: "tower".to_string(),
                score: 0.9,
            }]),
            classes: Some(Vec::new()),
            composition: Some(Composition {
                sky_ratio: 0.6,
                green_ratio: 0.1,
            }),
        };

        let candidates = extract_candidates(&analyzer, &[]).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, CandidateKind::Object);
    }

    #[tokio::test]
    async fn all_lanes_failing_yields_empty_list() {
        let candidates = extract_candidates(&StubAnalyzer::failing(), &[]).await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn candidate_list_is_capped() {
        let text: String = (0..20)
            .map(|i| format!("Landmark Tower {i}\n"))
            .collect();
        let analyzer = StubAnalyzer {
            text: Some(text),
            objects: Some(Vec::new()),
            classes: Some(Vec::new()),
            composition: Some(Composition {
                sky_ratio: 0.6,
                green_ratio: 0.1,
            }),
        };

        let candidates = extract_candidates(&analyzer, &[]).await;
        assert_eq!(candidates.len(), MAX_CANDIDATES);
    }

    #[tokio::test]
    async fn landmark_pass_runs_over_text_lane_output() {
        let analyzer = StubAnalyzer {
            text: Some("남산타워".to_string()),
            objects: Some(Vec::new()),
            classes: Some(Vec::new()),
            composition: Some(Composition {
                sky_ratio: 0.6,
                green_ratio: 0.1,
            }),
        };

        let candidates = extract_candidates(&analyzer, &[]).await;
        assert!(
            candidates
                .iter()
                .any(|c| c.kind == CandidateKind::Landmark && c.query == "남산타워"),
            "expected a landmark candidate, got {candidates:?}"
        );
    }
}
