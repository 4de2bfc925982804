//! Resolution policy: country-filtered search with a single global
//! retry.
//!
//! A resolution never fails — the worst outcome is an empty list. Any
//! upstream failure is logged and treated as "no contribution" so a
//! single bad query cannot abort a ranking pass.

use crate::client::GeocodeClient;
use crate::types::Place;

/// Resolves a free-text query to geocoded places.
///
/// When `country_hints` is non-empty the first attempt is filtered to
/// those countries. If that attempt errors or returns nothing, exactly
/// one retry runs without the filter. A failure of the unfiltered
/// attempt yields an empty list.
///
/// Queries shorter than 2 characters (after trimming) are rejected
/// without a network call.
pub async fn resolve(
    client: &GeocodeClient,
    query: &str,
    country_hints: &[String],
) -> Vec<Place> {
    let query = query.trim();
    if query.chars().count() < 2 {
        return Vec::new();
    }

    if !country_hints.is_empty() {
        match client.search(query, country_hints).await {
            Ok(places) if !places.is_empty() => return places,
            Ok(_) => {
                tracing::debug!(
                    query,
                    countries = country_hints.join(","),
                    "filtered search empty — retrying globally"
                );
            }
            Err(e) => {
                tracing::warn!(
                    query,
                    countries = country_hints.join(","),
                    error = %e,
                    "filtered search failed — retrying globally"
                );
            }
        }
    }

    match client.search(query, &[]).await {
        Ok(places) => places,
        Err(e) => {
            tracing::warn!(query, error = %e, "global search failed");
            Vec::new()
        }
    }
}
