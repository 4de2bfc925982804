//! Three-tier image aggregation with URL dedup and distance sort.

use geolens_core::{ImageResult, ImageSource};
use geolens_geocode::GeocodeClient;

use crate::keywords::{derived_queries, location_keywords};
use crate::sources::commons::CommonsClient;
use crate::sources::openverse::OpenverseClient;

/// Tier 1: geotagged pages fetched per request.
const GEO_LIMIT: usize = 20;
/// Tier 2: results kept per derived text query.
const TEXT_RESULTS_PER_QUERY: usize = 4;
/// Tier 3: Openverse page size.
const OPENVERSE_LIMIT: usize = 10;

/// Aggregates street images for a coordinate from three sources in
/// priority order.
///
/// Tiers run sequentially — each later tier deduplicates against
/// everything already collected. Tier failures are logged and isolated;
/// [`ImageAggregator::aggregate`] itself cannot fail.
#[derive(Debug, Clone)]
pub struct ImageAggregator {
    commons: CommonsClient,
    openverse: OpenverseClient,
    geocode: GeocodeClient,
    radius_m: u32,
}

impl ImageAggregator {
    #[must_use]
    pub fn new(
        commons: CommonsClient,
        openverse: OpenverseClient,
        geocode: GeocodeClient,
        radius_m: u32,
    ) -> Self {
        Self {
            commons,
            openverse,
            geocode,
            radius_m,
        }
    }

    /// Runs all three tiers and returns the merged, sorted result list.
    ///
    /// Order: ascending by distance, unknown distance last. The caller
    /// truncates for presentation.
    pub async fn aggregate(&self, lat: f64, lon: f64) -> Vec<ImageResult> {
        let mut results: Vec<ImageResult> = Vec::new();

        // Tier 1: geotagged photos near the point — most precise.
        match self
            .commons
            .geo_search(lat, lon, self.radius_m, GEO_LIMIT)
            .await
        {
            Ok(images) => {
                for image in images {
                    push_unique(&mut results, image);
                }
            }
            Err(e) => {
                tracing::warn!(tier = "geo", error = %e, "geosearch tier failed");
            }
        }

        // One reverse-geocode feeds keyword derivation for tiers 2 and 3.
        let location_name = match self.geocode.reverse(lat, lon).await {
            Ok(place) => place.display_name,
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocoding failed — text tiers degraded");
                String::new()
            }
        };
        let keywords = location_keywords(&location_name);

        // Tier 2: Commons text search on derived street/road queries.
        for query in derived_queries(&keywords) {
            match self.commons.text_search(&query, TEXT_RESULTS_PER_QUERY).await {
                Ok(images) => {
                    for mut image in images {
                        // Text hits have no geotag; pin them to the
                        // request point with unknown distance.
                        image.lat = Some(lat);
                        image.lon = Some(lon);
                        push_unique(&mut results, image);
                    }
                }
                Err(e) => {
                    tracing::warn!(tier = "text", query, error = %e, "text tier query failed");
                }
            }
        }

        // Tier 3: Openverse broadening on the most specific keyword.
        let base_query = keywords
            .first()
            .cloned()
            .unwrap_or_else(|| location_name.clone());
        if base_query.is_empty() {
            tracing::debug!("no base query for the openverse tier — skipping");
        } else {
            match self.openverse.search(&base_query, OPENVERSE_LIMIT).await {
                Ok(images) => {
                    for mut image in images {
                        image.lat = Some(lat);
                        image.lon = Some(lon);
                        push_unique(&mut results, image);
                    }
                }
                Err(e) => {
                    tracing::warn!(tier = "openverse", error = %e, "openverse tier failed");
                }
            }
        }

        // Known distances first, ascending; unknown last. The sort is
        // stable, so tier order breaks ties.
        results.sort_by(|a, b| {
            let da = a.distance_m.unwrap_or(f64::INFINITY);
            let db = b.distance_m.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        });

        let count_by = |source: ImageSource| results.iter().filter(|r| r.source == source).count();
        tracing::info!(
            lat,
            lon,
            total = results.len(),
            geo = count_by(ImageSource::WikimediaGeo),
            text = count_by(ImageSource::WikimediaText),
            openverse = count_by(ImageSource::Openverse),
            "street image aggregation complete"
        );

        results
    }
}

/// Appends an image unless its full URL is already present.
fn push_unique(results: &mut Vec<ImageResult>, image: ImageResult) {
    if results.iter().any(|r| r.full_url == image.full_url) {
        return;
    }
    results.push(image);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(full_url: &str, distance_m: Option<f64>, source: ImageSource) -> ImageResult {
        ImageResult {
            url: format!("{full_url}?thumb"),
            full_url: full_url.to_string(),
            title: "t".to_string(),
            description: String::new(),
            lat: None,
            lon: None,
            distance_m,
            source,
        }
    }

    #[test]
    fn push_unique_drops_duplicate_full_urls() {
        let mut results = Vec::new();
        push_unique(
            &mut results,
            image("https://img/a.jpg", Some(10.0), ImageSource::WikimediaGeo),
        );
        push_unique(
            &mut results,
            image("https://img/a.jpg", None, ImageSource::WikimediaText),
        );
        push_unique(
            &mut results,
            image("https://img/b.jpg", None, ImageSource::WikimediaText),
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, ImageSource::WikimediaGeo);
    }
}
