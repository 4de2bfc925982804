use thiserror::Error;

/// Terminal outcomes of the estimation pipeline.
///
/// Everything upstream of these — analyzer failures, geocoder failures,
/// individual empty resolutions — is absorbed at the call site. Only
/// the two "nothing found after all fallbacks" conditions reach the
/// caller, and their messages are user-facing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// Extraction produced zero usable evidence.
    #[error("could not find location information in the image; try a clearer photo")]
    NoCandidates,

    /// Candidates existed but none resolved to a place, even after the
    /// broadened single-word fallback search.
    #[error("location not found; try a photo with clear text or landmarks")]
    NoResolution,
}
