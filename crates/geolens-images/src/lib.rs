//! Multi-source street-image aggregation for geolens.
//!
//! Given a coordinate, three independent image sources are tried in
//! priority order: Commons geosearch (geotagged, most precise), Commons
//! text search on reverse-geocoded keywords, and Openverse as a
//! last-resort broadening step. Tier failures are isolated — the
//! aggregator itself never fails, it only returns fewer images.

mod aggregate;
mod error;
mod keywords;
mod sources;

pub use aggregate::ImageAggregator;
pub use error::ImagesError;
pub use sources::commons::CommonsClient;
pub use sources::openverse::OpenverseClient;
