//! Shared domain types and configuration for the geolens workspace.
//!
//! Holds the types that cross crate boundaries — resolved places and
//! aggregated image hits — plus the env-driven application config used
//! by the server and CLI binaries.

mod app_config;
mod config;
mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use types::{GeocodedLocation, ImageResult, ImageSource};
