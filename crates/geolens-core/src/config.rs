use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in
/// the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("GEOLENS_ENV", "development"));
    let bind_addr = parse_addr("GEOLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("GEOLENS_LOG_LEVEL", "info");
    let http_user_agent = or_default(
        "GEOLENS_HTTP_USER_AGENT",
        "geolens/0.1 (geo-image-aggregation)",
    );
    let http_timeout_secs = parse_u64("GEOLENS_HTTP_TIMEOUT_SECS", "30")?;
    let nominatim_base_url = or_default(
        "GEOLENS_NOMINATIM_URL",
        "https://nominatim.openstreetmap.org",
    );
    let commons_base_url = or_default(
        "GEOLENS_COMMONS_URL",
        "https://commons.wikimedia.org/w/api.php",
    );
    let openverse_base_url = or_default(
        "GEOLENS_OPENVERSE_URL",
        "https://api.openverse.engineering",
    );
    let geosearch_radius_m = parse_u32("GEOLENS_GEOSEARCH_RADIUS_M", "5000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        http_user_agent,
        http_timeout_secs,
        nominatim_base_url,
        commons_base_url,
        openverse_base_url,
        geosearch_radius_m,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_yields_all_defaults() {
        let map = HashMap::new();
        let config = build_app_config(lookup_from_map(&map)).expect("defaults parse");

        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.geosearch_radius_m, 5000);
        assert_eq!(
            config.nominatim_base_url,
            "https://nominatim.openstreetmap.org"
        );
    }

    #[test]
    fn overrides_are_honored() {
        let mut map = HashMap::new();
        map.insert("GEOLENS_ENV", "production");
        map.insert("GEOLENS_BIND_ADDR", "127.0.0.1:8080");
        map.insert("GEOLENS_NOMINATIM_URL", "http://localhost:9999");
        map.insert("GEOLENS_GEOSEARCH_RADIUS_M", "1000");

        let config = build_app_config(lookup_from_map(&map)).expect("overrides parse");

        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.nominatim_base_url, "http://localhost:9999");
        assert_eq!(config.geosearch_radius_m, 1000);
    }

    #[test]
    fn invalid_bind_addr_is_an_error() {
        let mut map = HashMap::new();
        map.insert("GEOLENS_BIND_ADDR", "not-an-addr");

        let err = build_app_config(lookup_from_map(&map)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar { ref var, .. } if var == "GEOLENS_BIND_ADDR"
        ));
    }

    #[test]
    fn invalid_radius_is_an_error() {
        let mut map = HashMap::new();
        map.insert("GEOLENS_GEOSEARCH_RADIUS_M", "five km");

        assert!(build_app_config(lookup_from_map(&map)).is_err());
    }

    #[test]
    fn unrecognized_environment_defaults_to_development() {
        let mut map = HashMap::new();
        map.insert("GEOLENS_ENV", "staging");

        let config = build_app_config(lookup_from_map(&map)).expect("parses");
        assert_eq!(config.env, Environment::Development);
    }
}
