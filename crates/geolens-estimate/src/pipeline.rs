//! End-to-end estimation: image evidence → ranked locations.

use geolens_core::GeocodedLocation;
use geolens_geocode::GeocodeClient;

use crate::analyzer::ImageAnalyzer;
use crate::error::EstimateError;
use crate::lanes::extract_candidates;
use crate::rank::rank_candidates;

/// The outcome of one estimation pass.
#[derive(Debug, Clone)]
pub struct LocationEstimate {
    /// Ranked locations, strongest recommendation first.
    pub locations: Vec<GeocodedLocation>,
    /// Language detected from the text evidence, when any.
    pub language: Option<String>,
    /// Country hints derived from the detected language.
    pub country_hints: Vec<String>,
}

/// Runs the full pipeline for one image.
///
/// 1. Extract candidates from all evidence lanes (failures isolated).
/// 2. Rank: dedup, resolve, score, fall back to broadened search.
///
/// # Errors
///
/// - [`EstimateError::NoCandidates`] when extraction found nothing
///   usable.
/// - [`EstimateError::NoResolution`] when no candidate resolved to a
///   place, even after the broadened fallback.
pub async fn estimate_location<A: ImageAnalyzer>(
    analyzer: &A,
    geocoder: &GeocodeClient,
    image: &[u8],
) -> Result<LocationEstimate, EstimateError> {
    let candidates = extract_candidates(analyzer, image).await;
    if candidates.is_empty() {
        tracing::info!("extraction produced no usable evidence");
        return Err(EstimateError::NoCandidates);
    }

    let language = candidates.iter().find_map(|c| c.language.clone());
    let country_hints = candidates
        .iter()
        .find(|c| !c.country_hints.is_empty())
        .map(|c| c.country_hints.clone())
        .unwrap_or_default();

    let locations = rank_candidates(geocoder, candidates).await?;
    tracing::info!(
        count = locations.len(),
        language = language.as_deref().unwrap_or("unknown"),
        "estimation complete"
    );

    Ok(LocationEstimate {
        locations,
        language,
        country_hints,
    })
}
