use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;

use geolens_core::ImageResult;

use super::{ApiError, AppState};

/// Raw query parameters, parsed by hand so that a missing or malformed
/// value produces this API's 400 body instead of a framework rejection.
#[derive(Debug, Deserialize)]
pub(super) struct StreetImagesParams {
    lat: Option<String>,
    lon: Option<String>,
}

/// `GET /api/street-images?lat=<float>&lon=<float>`
///
/// Returns the merged, distance-sorted image list for the coordinate.
/// Upstream tier failures never fail the request — a request where
/// every source is down returns `200 []`.
pub(super) async fn street_images(
    State(state): State<AppState>,
    Query(params): Query<StreetImagesParams>,
) -> Result<Json<Vec<ImageResult>>, ApiError> {
    let lat = parse_finite(params.lat.as_deref());
    let lon = parse_finite(params.lon.as_deref());

    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(ApiError::bad_request(
            "valid lat and lon query parameters are required",
        ));
    };

    let results = state.aggregator.aggregate(lat, lon).await;
    Ok(Json(results))
}

fn parse_finite(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordinary_floats() {
        assert_eq!(parse_finite(Some("48.8584")), Some(48.8584));
        assert_eq!(parse_finite(Some("-122.4")), Some(-122.4));
    }

    #[test]
    fn rejects_missing_and_malformed_values() {
        assert_eq!(parse_finite(None), None);
        assert_eq!(parse_finite(Some("")), None);
        assert_eq!(parse_finite(Some("north")), None);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(parse_finite(Some("NaN")), None);
        assert_eq!(parse_finite(Some("inf")), None);
        assert_eq!(parse_finite(Some("-inf")), None);
    }
}
