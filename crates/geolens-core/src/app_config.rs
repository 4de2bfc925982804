use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration shared by the server and CLI binaries.
///
/// All fields have defaults; any of them can be overridden through
/// `GEOLENS_*` environment variables. Upstream base URLs are
/// configurable so tests can point the HTTP clients at a mock server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// User agent sent on every upstream request. Nominatim's usage
    /// policy requires an identifying agent.
    pub http_user_agent: String,
    pub http_timeout_secs: u64,
    pub nominatim_base_url: String,
    pub commons_base_url: String,
    pub openverse_base_url: String,
    /// Geosearch radius for the proximity image tier, in meters.
    pub geosearch_radius_m: u32,
}
