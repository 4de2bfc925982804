mod estimate;
mod images;
mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "geolens")]
#[command(about = "geolens command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Estimate a location from recognized text lines.
    Estimate {
        /// File with recognized text, one OCR line per file line.
        #[arg(long, conflicts_with = "text")]
        text_file: Option<PathBuf>,
        /// Inline text line. Repeat for multiple lines.
        #[arg(long = "text")]
        text: Vec<String>,
    },
    /// Resolve one free-text query to geocoded places.
    Resolve {
        query: String,
        /// Restrict the first search attempt to these ISO country codes.
        #[arg(long = "country")]
        countries: Vec<String>,
    },
    /// Aggregate street images for a coordinate.
    Images { lat: f64, lon: f64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = geolens_core::load_app_config_from_env()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Estimate { text_file, text } => {
            estimate::run(&config, text_file, text).await
        }
        Commands::Resolve { query, countries } => resolve::run(&config, &query, countries).await,
        Commands::Images { lat, lon } => images::run(&config, lat, lon).await,
    }
}
