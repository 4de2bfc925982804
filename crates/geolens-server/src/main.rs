mod api;

use tracing_subscriber::EnvFilter;

use geolens_geocode::GeocodeClient;
use geolens_images::{CommonsClient, ImageAggregator, OpenverseClient};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = geolens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

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

    let app = build_app(AppState { aggregator });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "street images API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
