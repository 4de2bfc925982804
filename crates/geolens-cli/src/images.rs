//! `geolens images` — run the street-image aggregator for a coordinate.

use geolens_core::{AppConfig, ImageSource};
use geolens_geocode::GeocodeClient;
use geolens_images::{CommonsClient, ImageAggregator, OpenverseClient};

pub(crate) async fn run(config: &AppConfig, lat: f64, lon: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        lat.is_finite() && lon.is_finite(),
        "valid lat and lon are required"
    );

    let commons = CommonsClient::with_base_url(
        &config.http_user_agent,
        config.http_timeout_secs,
        &config.commons_base_url,
    )?;
    let openverse = OpenverseClient::with_base_url(
        &config.http_user_agent,
        config.http_timeout_secs,
        &config.openverse_base_url,
    )?;
    let geocode = GeocodeClient::with_base_url(
        &config.http_user_agent,
        config.http_timeout_secs,
        &config.nominatim_base_url,
    )?;
    let aggregator = ImageAggregator::new(commons, openverse, geocode, config.geosearch_radius_m);

    let results = aggregator.aggregate(lat, lon).await;

    let count_by =
        |source: ImageSource| results.iter().filter(|r| r.source == source).count();
    println!(
        "{} images (geo {}, text {}, openverse {})",
        results.len(),
        count_by(ImageSource::WikimediaGeo),
        count_by(ImageSource::WikimediaText),
        count_by(ImageSource::Openverse),
    );

    for image in &results {
        match image.distance_m {
            Some(distance) => println!("[{}] {:.0} m — {}", image.source, distance, image.title),
            None => println!("[{}] — {}", image.source, image.title),
        }
        println!("    {}", image.full_url);
    }

    Ok(())
}
