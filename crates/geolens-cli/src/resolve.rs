//! `geolens resolve` — one geocode resolution, with the same
//! filtered-then-global policy the ranker uses.

use geolens_core::AppConfig;
use geolens_geocode::{resolve, GeocodeClient};

pub(crate) async fn run(
    config: &AppConfig,
    query: &str,
    countries: Vec<String>,
) -> anyhow::Result<()> {
    let client = GeocodeClient::with_base_url(
        &config.http_user_agent,
        config.http_timeout_secs,
        &config.nominatim_base_url,
    )?;

    let places = resolve(&client, query, &countries).await;
    if places.is_empty() {
        println!("no places found for \"{query}\"");
        return Ok(());
    }

    for (index, place) in places.iter().enumerate() {
        println!("{}. {}", index + 1, place.display_name);
        println!("   lat {:.6}, lon {:.6}", place.lat, place.lon);
    }

    Ok(())
}
