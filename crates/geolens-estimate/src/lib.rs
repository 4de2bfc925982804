//! Location estimation pipeline for geolens.
//!
//! Turns raw image evidence (recognized text, detected objects, image
//! classes, composition ratios) into weighted location candidates,
//! resolves them through the geocoder, and ranks the resolved places by
//! a composite recommendation score. Individual evidence lanes and
//! resolutions fail independently; only the terminal "nothing found"
//! conditions surface as errors.

pub mod analyzer;
pub mod composition;
pub mod error;
pub mod lang;
pub mod lanes;
pub mod pipeline;
pub mod rank;
pub mod types;

mod landmark;
mod normalize;
mod place_name;

pub use analyzer::{AnalyzerError, Composition, DetectedObject, ImageAnalyzer, ImageClass};
pub use error::EstimateError;
pub use lang::{detect_language, LanguageHint};
pub use lanes::extract_candidates;
pub use lanes::text::candidates_from_text;
pub use normalize::normalize_recognized_text;
pub use pipeline::{estimate_location, LocationEstimate};
pub use rank::rank_candidates;
pub use types::{CandidateKind, LocationCandidate};
