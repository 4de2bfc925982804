//! Landmark keyword post-pass over extracted text candidates.

use crate::types::{CandidateKind, LocationCandidate};

/// Confidence for a landmark keyword hit — the strongest single signal
/// the extractor produces.
pub(crate) const LANDMARK_CONFIDENCE: f64 = 0.9;

/// Korean and English landmark keywords, including a handful of
/// well-known Korean place names.
const LANDMARK_KEYWORDS: &[&str] = &[
    "타워", "Tower", "빌딩", "Building", "센터", "Center", "궁", "Palace", "사원", "Temple",
    "교회", "Church", "성당", "Cathedral", "공원", "Park", "광장", "Square", "다리", "Bridge",
    "역", "Station", "공항", "Airport", "호텔", "Hotel", "박물관", "Museum", "미술관",
    "Gallery", "서울", "Seoul", "부산", "Busan", "제주", "Jeju", "경복궁", "Gyeongbokgung",
    "남산", "Namsan", "한강", "Han River", "롯데타워", "Lotte Tower",
];

/// Re-scans text candidates for landmark keywords.
///
/// A pure post-pass: it consumes already-extracted candidates and emits
/// a new high-confidence landmark candidate per hit, leaving the
/// originals untouched.
pub(crate) fn landmark_candidates(candidates: &[LocationCandidate]) -> Vec<LocationCandidate> {
    candidates
        .iter()
        .filter(|c| c.kind == CandidateKind::Text)
        .filter(|c| LANDMARK_KEYWORDS.iter().any(|kw| c.query.contains(kw)))
        .map(|c| LocationCandidate {
            query: c.query.clone(),
            kind: CandidateKind::Landmark,
            confidence: LANDMARK_CONFIDENCE,
            source: "landmark".to_string(),
            language: c.language.clone(),
            country_hints: c.country_hints.clone(),
        })
        .collect()
}
