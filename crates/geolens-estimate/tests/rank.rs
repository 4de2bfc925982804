//! Integration tests for the ranking pipeline against a mock geocoder.

use geolens_estimate::{
    estimate_location, rank_candidates, AnalyzerError, CandidateKind, Composition,
    DetectedObject, EstimateError, ImageAnalyzer, ImageClass, LocationCandidate,
};
use geolens_geocode::GeocodeClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeocodeClient {
    GeocodeClient::with_base_url("geolens-test/0.1", 30, base_url)
        .expect("client construction should not fail")
}

fn candidate(query: &str, confidence: f64, hints: &[&str]) -> LocationCandidate {
    LocationCandidate {
        query: query.to_string(),
        kind: CandidateKind::Text,
        confidence,
        source: "ocr".to_string(),
        language: None,
        country_hints: hints.iter().map(|h| (*h).to_string()).collect(),
    }
}

fn place_entry(display_name: &str, lat: f64, lon: f64, country_code: &str) -> serde_json::Value {
    serde_json::json!({
        "display_name": display_name,
        "lat": lat.to_string(),
        "lon": lon.to_string(),
        "address": { "country_code": country_code }
    })
}

async fn mount_search(server: &MockServer, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn country_match_outranks_equal_accuracy() {
    let server = MockServer::start().await;

    // The Korea-filtered Paris lookup is empty; the global retry finds
    // the French result.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "paris"))
        .and(query_param("countrycodes", "kr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_search(
        &server,
        "paris",
        serde_json::json!([place_entry("Paris, France", 48.85, 2.35, "fr")]),
    )
    .await;
    mount_search(
        &server,
        "seoul",
        serde_json::json!([place_entry("Seoul, South Korea", 37.56, 126.97, "kr")]),
    )
    .await;

    let client = test_client(&server.uri());
    let locations = rank_candidates(
        &client,
        vec![
            candidate("paris", 0.5, &["kr"]),
            candidate("seoul", 0.5, &["kr"]),
        ],
    )
    .await
    .expect("both candidates resolve");

    assert_eq!(locations.len(), 2);
    // Equal accuracy (0.5 + 0.2 query match), but only Seoul earns the
    // 0.3 country-match bonus.
    assert!(locations[0].display_name.starts_with("Seoul"));
    assert!(locations[1].display_name.starts_with("Paris"));
}

#[tokio::test]
async fn per_candidate_results_are_capped_at_two() {
    let server = MockServer::start().await;

    let entries: Vec<serde_json::Value> = (0..5)
        .map(|i| {
            place_entry(
                &format!("Springfield {i}, USA"),
                39.0 + f64::from(i),
                -89.0,
                "us",
            )
        })
        .collect();
    mount_search(&server, "springfield", serde_json::json!(entries)).await;

    let client = test_client(&server.uri());
    let locations = rank_candidates(&client, vec![candidate("springfield", 0.9, &[])])
        .await
        .expect("resolves");

    assert_eq!(locations.len(), 2, "only two results per candidate");
}

#[tokio::test]
async fn final_list_is_capped_at_three() {
    // Four candidates, each resolving to one place: the weakest
    // recommendation is discarded. This pins current behavior — a
    // high-confidence fourth hit is dropped by design, not by accident.
    let server = MockServer::start().await;

    for (query, name) in [
        ("alpha", "Alpha Town, Country A"),
        ("beta", "Beta City, Country B"),
        ("gamma", "Gamma Village, Country C"),
        ("delta", "Delta Borough, Country D"),
    ] {
        mount_search(
            &server,
            query,
            serde_json::json!([place_entry(name, 1.0, 1.0, "aa")]),
        )
        .await;
    }

    let client = test_client(&server.uri());
    let locations = rank_candidates(
        &client,
        vec![
            candidate("alpha", 0.9, &[]),
            candidate("beta", 0.8, &[]),
            candidate("gamma", 0.7, &[]),
            candidate("delta", 0.6, &[]),
        ],
    )
    .await
    .expect("resolves");

    assert_eq!(locations.len(), 3);
    assert!(locations
        .iter()
        .all(|l| !l.display_name.starts_with("Delta")));
}

#[tokio::test]
async fn broadened_fallback_runs_before_no_resolution() {
    let server = MockServer::start().await;

    // The full query resolves to nothing...
    mount_search(&server, "Gangnam Station", serde_json::json!([])).await;
    // ...but its individual words do.
    mount_search(
        &server,
        "Gangnam",
        serde_json::json!([place_entry("Gangnam-gu, Seoul, South Korea", 37.51, 127.04, "kr")]),
    )
    .await;
    mount_search(
        &server,
        "Station",
        serde_json::json!([place_entry("Station, Some Place", 10.0, 10.0, "aa")]),
    )
    .await;

    let client = test_client(&server.uri());
    let locations = rank_candidates(&client, vec![candidate("Gangnam Station", 0.85, &[])])
        .await
        .expect("fallback finds places");

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].original_query, "Gangnam");
    assert_eq!(locations[0].source, "ocr (partial search)");
    // Reduced confidence: 0.85 × 0.7.
    assert!((locations[0].confidence - 0.595).abs() < 1e-9);
}

#[tokio::test]
async fn nothing_resolving_is_no_resolution() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = rank_candidates(&client, vec![candidate("nowhere", 0.85, &[])])
        .await
        .unwrap_err();

    assert_eq!(err, EstimateError::NoResolution);
}

#[tokio::test]
async fn empty_candidate_list_is_no_candidates() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    let err = rank_candidates(&client, Vec::new()).await.unwrap_err();
    assert_eq!(err, EstimateError::NoCandidates);
}

/// Stub analyzer for end-to-end pipeline tests.
struct TextAnalyzer {
    text: Option<String>,
}

impl ImageAnalyzer for TextAnalyzer {
    async fn recognize_text(&self, _image: &[u8]) -> Result<String, AnalyzerError> {
        self.text
            .clone()
            .ok_or_else(|| AnalyzerError("ocr down".to_string()))
    }

    async fn detect_objects(&self, _image: &[u8]) -> Result<Vec<DetectedObject>, AnalyzerError> {
        Ok(Vec::new())
    }

    async fn classify(&self, _image: &[u8]) -> Result<Vec<ImageClass>, AnalyzerError> {
        Ok(Vec::new())
    }

    async fn composition(&self, _image: &[u8]) -> Result<Composition, AnalyzerError> {
        // Open-sky scene: contributes no hints.
        Ok(Composition {
            sky_ratio: 0.6,
            green_ratio: 0.1,
        })
    }
}

#[tokio::test]
async fn korean_text_estimates_to_korean_places() {
    let server = MockServer::start().await;

    // Catch-all: every search (filtered or global) finds Gangnam.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([place_entry(
            "강남구, 서울특별시, 대한민국",
            37.5172,
            127.0473,
            "kr"
        )])))
        .mount(&server)
        .await;

    let analyzer = TextAnalyzer {
        text: Some("서울특별시 강남구 신사동".to_string()),
    };
    let client = test_client(&server.uri());

    let estimate = estimate_location(&analyzer, &client, &[])
        .await
        .expect("estimates");

    assert!(!estimate.locations.is_empty());
    assert_eq!(estimate.language.as_deref(), Some("kor"));
    assert_eq!(estimate.country_hints, vec!["kr".to_string()]);
    assert!((estimate.locations[0].lat - 37.5172).abs() < 1e-6);
}

#[tokio::test]
async fn no_evidence_is_no_candidates() {
    let server = MockServer::start().await;
    let analyzer = TextAnalyzer { text: None };
    let client = test_client(&server.uri());

    let err = estimate_location(&analyzer, &client, &[])
        .await
        .unwrap_err();
    assert_eq!(err, EstimateError::NoCandidates);
}
