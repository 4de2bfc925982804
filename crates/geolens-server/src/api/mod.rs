mod street_images;

use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use geolens_images::ImageAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: ImageAggregator,
}

/// Error body shape of this API: `{"error": "..."}`.
#[derive(Debug)]
pub(super) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(super) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

/// Permissive CORS for development: the map frontend is served from a
/// different origin.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/street-images", get(street_images::street_images))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::{method as http_method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use geolens_geocode::GeocodeClient;
    use geolens_images::{CommonsClient, OpenverseClient};

    /// Builds the app with every upstream pointed at one mock server.
    fn test_app(upstream: &MockServer) -> Router {
        let commons = CommonsClient::with_base_url(
            "geolens-test/0.1",
            30,
            &format!("{}/w/api.php", upstream.uri()),
        )
        .expect("commons client");
        let openverse = OpenverseClient::with_base_url("geolens-test/0.1", 30, &upstream.uri())
            .expect("openverse client");
        let geocode = GeocodeClient::with_base_url("geolens-test/0.1", 30, &upstream.uri())
            .expect("geocode client");
        let aggregator = ImageAggregator::new(commons, openverse, geocode, 5000);
        build_app(AppState { aggregator })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let upstream = MockServer::start().await;
        let (status, body) = get_json(test_app(&upstream), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn missing_parameters_are_a_400() {
        let upstream = MockServer::start().await;
        let (status, body) = get_json(test_app(&upstream), "/api/street-images").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "valid lat and lon query parameters are required"
        );
    }

    #[tokio::test]
    async fn non_numeric_parameters_are_a_400() {
        let upstream = MockServer::start().await;
        let (status, _) =
            get_json(test_app(&upstream), "/api/street-images?lat=north&lon=2.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_finite_parameters_are_a_400() {
        let upstream = MockServer::start().await;
        let (status, _) =
            get_json(test_app(&upstream), "/api/street-images?lat=NaN&lon=2.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn all_upstreams_down_still_returns_200_with_empty_array() {
        let upstream = MockServer::start().await;
        Mock::given(http_method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&upstream)
            .await;

        let (status, body) = get_json(
            test_app(&upstream),
            "/api/street-images?lat=48.8584&lon=2.2945",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn geotagged_results_are_served_with_wire_field_names() {
        let upstream = MockServer::start().await;

        Mock::given(http_method("GET"))
            .and(url_path("/w/api.php"))
            .and(query_param("list", "geosearch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": { "geosearch": [
                    { "pageid": 1, "lat": 48.8583, "lon": 2.2944, "dist": 42.0 }
                ] }
            })))
            .mount(&upstream)
            .await;
        Mock::given(http_method("GET"))
            .and(url_path("/w/api.php"))
            .and(query_param("prop", "imageinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": { "pages": { "1": {
                    "pageid": 1,
                    "title": "File:Eiffel.jpg",
                    "imageinfo": [{ "url": "https://img/eiffel.jpg" }]
                } } }
            })))
            .mount(&upstream)
            .await;
        // Reverse geocoding is down; the text tiers degrade silently.
        Mock::given(http_method("GET"))
            .and(url_path("/reverse"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&upstream)
            .await;

        let (status, body) = get_json(
            test_app(&upstream),
            "/api/street-images?lat=48.8584&lon=2.2945",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["fullUrl"], "https://img/eiffel.jpg");
        assert_eq!(body[0]["distance"], 42.0);
        assert_eq!(body[0]["source"], "wikimedia-geo");
        assert_eq!(body[0]["title"], "Eiffel.jpg");
    }
}
