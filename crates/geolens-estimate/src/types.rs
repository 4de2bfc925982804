/// The kind of evidence a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A line or word of recognized text.
    Text,
    /// A detected object label.
    Object,
    /// An image-classification label.
    Category,
    /// A text candidate that matched the landmark keyword list.
    Landmark,
    /// A coarse composition hint (urban / nature).
    Visual,
}

/// An unresolved hypothesis about where an image was taken.
///
/// Created per unit of evidence by the extraction lanes, consumed by the
/// ranker after resolution, never persisted.
#[derive(Debug, Clone)]
pub struct LocationCandidate {
    /// Free-text search query: an OCR phrase, object class name, or
    /// landmark keyword.
    pub query: String,
    pub kind: CandidateKind,
    /// Source-specific prior in [0, 1].
    pub confidence: f64,
    /// Which extractor produced this candidate.
    pub source: String,
    /// Detected language code, when the text lane identified one.
    pub language: Option<String>,
    /// ISO country codes associated with the detected language. Used as
    /// a geocoder filter and for the country-match ranking bonus.
    pub country_hints: Vec<String>,
}

impl LocationCandidate {
    /// A candidate without language information (vision and composition
    /// lanes).
    pub(crate) fn bare(
        query: impl Into<String>,
        kind: CandidateKind,
        confidence: f64,
        source: &str,
    ) -> Self {
        Self {
            query: query.into(),
            kind,
            confidence,
            source: source.to_string(),
            language: None,
            country_hints: Vec::new(),
        }
    }
}
