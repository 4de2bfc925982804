//! Candidate ranking: dedup, concurrent resolution, scoring, fallback.
//!
//! Deduplication and the confidence sort run strictly before any
//! network call, and the final order comes from a re-sort rather than
//! call-completion order — the ranking is deterministic for a given
//! candidate set regardless of network latency variance.

use std::collections::HashSet;

use futures::future::join_all;
use geolens_core::GeocodedLocation;
use geolens_geocode::{resolve, GeocodeClient, Place};

use crate::error::EstimateError;
use crate::types::LocationCandidate;

/// At most this many candidates are resolved per ranking pass.
pub(crate) const MAX_RESOLVED_CANDIDATES: usize = 5;
/// Geocoded results kept per originating candidate.
pub(crate) const RESULTS_PER_CANDIDATE: usize = 2;
/// Size of the final recommendation list.
pub(crate) const MAX_RANKED_RESULTS: usize = 3;

/// Bonus when the candidate's query text appears in the resolved name.
const QUERY_MATCH_BONUS: f64 = 0.2;
/// Bonus when the resolved country matches the language-derived hints.
const COUNTRY_MATCH_BONUS: f64 = 0.3;
/// Bonus for an already-accurate result.
const HIGH_ACCURACY_BONUS: f64 = 0.2;
const HIGH_ACCURACY_THRESHOLD: f64 = 0.7;
/// Bonus for a display name with enough address components.
const DETAILED_ADDRESS_BONUS: f64 = 0.1;
const MIN_ADDRESS_PARTS: usize = 3;

/// Fallback searches carry reduced confidence.
const FALLBACK_CONFIDENCE_FACTOR: f64 = 0.7;
const FALLBACK_CANDIDATES: usize = 3;
const FALLBACK_WORDS_PER_CANDIDATE: usize = 2;

/// Ranks location candidates into a short ordered list of geocoded
/// places.
///
/// Candidates are deduplicated and confidence-sorted, the top
/// [`MAX_RESOLVED_CANDIDATES`] are resolved concurrently, and resolved
/// places are re-ranked by recommendation score. When nothing resolves,
/// a broadened single-word search runs before giving up.
///
/// # Errors
///
/// - [`EstimateError::NoCandidates`] when the deduplicated candidate
///   list is empty.
/// - [`EstimateError::NoResolution`] when no candidate resolved even
///   after the broadened fallback.
pub async fn rank_candidates(
    client: &GeocodeClient,
    candidates: Vec<LocationCandidate>,
) -> Result<Vec<GeocodedLocation>, EstimateError> {
    let deduped = dedup_candidates(candidates);
    if deduped.is_empty() {
        return Err(EstimateError::NoCandidates);
    }

    let top: Vec<&LocationCandidate> = deduped.iter().take(MAX_RESOLVED_CANDIDATES).collect();
    tracing::debug!(count = top.len(), "resolving candidates");

    let resolutions = join_all(
        top.iter()
            .map(|c| resolve(client, &c.query, &c.country_hints)),
    )
    .await;

    let mut scored: Vec<(GeocodedLocation, &LocationCandidate)> = Vec::new();
    for (candidate, places) in top.into_iter().zip(resolutions) {
        for place in places.into_iter().take(RESULTS_PER_CANDIDATE) {
            let confidence = accuracy_score(candidate, &place.display_name);
            scored.push((
                geocoded(place, confidence, &candidate.query, &candidate.source),
                candidate,
            ));
        }
    }

    if scored.is_empty() {
        tracing::info!("no candidate resolved — running broadened fallback search");
        let fallback = broadened_search(client, &deduped).await;
        if fallback.is_empty() {
            return Err(EstimateError::NoResolution);
        }
        return Ok(fallback);
    }

    let mut ranked: Vec<(f64, GeocodedLocation)> = scored
        .into_iter()
        .map(|(location, candidate)| {
            let score = recommendation_score(&location, &candidate.country_hints);
            (score, location)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    Ok(ranked
        .into_iter()
        .take(MAX_RANKED_RESULTS)
        .map(|(_, location)| location)
        .collect())
}

/// Sorts descending by confidence (stable), then keeps the first
/// occurrence of each lowercased trimmed query. Queries shorter than 2
/// characters are dropped.
fn dedup_candidates(mut candidates: Vec<LocationCandidate>) -> Vec<LocationCandidate> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut seen = HashSet::new();
    candidates.retain(|c| {
        let key = c.query.trim().to_lowercase();
        key.chars().count() >= 2 && seen.insert(key)
    });
    candidates
}

/// Candidate prior plus the query-match bonus, clamped to [0, 1].
///
/// The bonus applies when the full query appears in the display name or
/// any query word of length ≥ 3 does.
fn accuracy_score(candidate: &LocationCandidate, display_name: &str) -> f64 {
    let query = candidate.query.trim().to_lowercase();
    let name = display_name.to_lowercase();

    let matched = name.contains(&query)
        || query
            .split_whitespace()
            .any(|word| word.chars().count() >= 3 && name.contains(word));

    let score = candidate.confidence + if matched { QUERY_MATCH_BONUS } else { 0.0 };
    score.clamp(0.0, 1.0)
}

/// Composite ranking metric: accuracy plus country-match, high-accuracy
/// and address-completeness bonuses. May exceed 1.0 — it is an ordering
/// key, not a confidence.
fn recommendation_score(location: &GeocodedLocation, country_hints: &[String]) -> f64 {
    let mut score = location.confidence;

    if let Some(code) = location.country_code() {
        if country_hints.iter().any(|h| h.eq_ignore_ascii_case(&code)) {
            score += COUNTRY_MATCH_BONUS;
        }
    }
    if location.confidence > HIGH_ACCURACY_THRESHOLD {
        score += HIGH_ACCURACY_BONUS;
    }
    if location.display_name.split(',').count() >= MIN_ADDRESS_PARTS {
        score += DETAILED_ADDRESS_BONUS;
    }

    score
}

/// Broadened fallback: re-split the strongest candidate queries into
/// individual words and resolve each word globally. One result is kept
/// per word, at reduced confidence and with a provenance suffix, in
/// discovery order.
async fn broadened_search(
    client: &GeocodeClient,
    candidates: &[LocationCandidate],
) -> Vec<GeocodedLocation> {
    let mut found = Vec::new();

    for candidate in candidates.iter().take(FALLBACK_CANDIDATES) {
        let words = candidate
            .query
            .split_whitespace()
            .filter(|w| w.chars().count() >= 2)
            .take(FALLBACK_WORDS_PER_CANDIDATE);

        for word in words {
            let places = resolve(client, word, &[]).await;
            if let Some(place) = places.into_iter().next() {
                let confidence = (candidate.confidence * FALLBACK_CONFIDENCE_FACTOR).min(1.0);
                found.push(geocoded(
                    place,
                    confidence,
                    word,
                    &format!("{} (partial search)", candidate.source),
                ));
            }
        }
    }

    found
}

fn geocoded(
    place: Place,
    confidence: f64,
    original_query: &str,
    source: &str,
) -> GeocodedLocation {
    GeocodedLocation {
        display_name: place.display_name,
        lat: place.lat,
        lon: place.lon,
        address: place.address,
        confidence,
        original_query: original_query.to_string(),
        source: source.to_string(),
    }
}
