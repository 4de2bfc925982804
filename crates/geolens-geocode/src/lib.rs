//! HTTP client and resolution policy for the Nominatim geocoding API.
//!
//! [`GeocodeClient`] wraps `reqwest` with typed responses and
//! geocoder-specific error handling; [`resolve`] layers the
//! filtered-then-global retry policy on top and never surfaces an error
//! to its caller — a resolution that fails twice is simply empty.

mod client;
mod error;
mod resolver;
mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use resolver::resolve;
pub use types::{Place, ReversePlace};
