//! `geolens estimate` — run the estimation pipeline over recognized
//! text supplied on the command line, standing in for an OCR engine.

use std::path::PathBuf;

use anyhow::Context;

use geolens_core::AppConfig;
use geolens_estimate::{
    estimate_location, AnalyzerError, Composition, DetectedObject, ImageAnalyzer, ImageClass,
};
use geolens_geocode::GeocodeClient;

/// Analyzer backed by pre-recognized text: the text lane sees the given
/// lines, the vision lanes see nothing, and composition contributes no
/// hints.
struct TextOnlyAnalyzer {
    text: String,
}

impl ImageAnalyzer for TextOnlyAnalyzer {
    async fn recognize_text(&self, _image: &[u8]) -> Result<String, AnalyzerError> {
        Ok(self.text.clone())
    }

    async fn detect_objects(&self, _image: &[u8]) -> Result<Vec<DetectedObject>, AnalyzerError> {
        Ok(Vec::new())
    }

    async fn classify(&self, _image: &[u8]) -> Result<Vec<ImageClass>, AnalyzerError> {
        Ok(Vec::new())
    }

    async fn composition(&self, _image: &[u8]) -> Result<Composition, AnalyzerError> {
        // Neutral ratios: neither the urban nor the nature hint fires.
        Ok(Composition {
            sky_ratio: 1.0,
            green_ratio: 0.0,
        })
    }
}

pub(crate) async fn run(
    config: &AppConfig,
    text_file: Option<PathBuf>,
    text: Vec<String>,
) -> anyhow::Result<()> {
    let recognized = match text_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => text.join("\n"),
    };
    anyhow::ensure!(
        !recognized.trim().is_empty(),
        "no text given — use --text-file or --text"
    );

    let analyzer = TextOnlyAnalyzer { text: recognized };
    let geocode = GeocodeClient::with_base_url(
        &config.http_user_agent,
        config.http_timeout_secs,
        &config.nominatim_base_url,
    )?;

    let estimate = match estimate_location(&analyzer, &geocode, &[]).await {
        Ok(estimate) => estimate,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    if let Some(language) = &estimate.language {
        println!(
            "detected language: {language} (country hints: {})",
            estimate.country_hints.join(", ")
        );
    }
    for (index, location) in estimate.locations.iter().enumerate() {
        println!(
            "{}. {}  ({:.0}% via {})",
            index + 1,
            location.display_name,
            location.confidence * 100.0,
            location.source
        );
        println!(
            "   lat {:.6}, lon {:.6}  [query: {}]",
            location.lat, location.lon, location.original_query
        );
    }

    Ok(())
}
