//! Text lane: recognized text → weighted location candidates.

use crate::analyzer::ImageAnalyzer;
use crate::lang::{detect_language, is_hangul_syllable, LanguageHint};
use crate::normalize::normalize_recognized_text;
use crate::place_name::{is_excluded_query, looks_like_place_name};
use crate::types::{CandidateKind, LocationCandidate};

/// Prior for text that matches a place-name pattern.
pub(crate) const PLACE_TEXT_CONFIDENCE: f64 = 0.85;
/// Prior for text that merely looks like a usable query.
pub(crate) const PLAIN_TEXT_CONFIDENCE: f64 = 0.3;

/// Line candidates must fit a plausible place-name length.
const MIN_LINE_CHARS: usize = 3;
const MAX_LINE_CHARS: usize = 40;

/// At most this many words are scanned for word-level candidates.
const MAX_SCANNED_WORDS: usize = 10;

pub(crate) async fn collect<A: ImageAnalyzer>(
    analyzer: &A,
    image: &[u8],
) -> Vec<LocationCandidate> {
    match analyzer.recognize_text(image).await {
        Ok(raw) => {
            let normalized = normalize_recognized_text(&raw);
            candidates_from_text(&normalized)
        }
        Err(e) => {
            tracing::warn!(lane = "text", error = %e, "text recognition failed");
            Vec::new()
        }
    }
}

/// Builds candidates from normalized recognized text.
///
/// Produces line-level candidates (full lines that contain Hangul or
/// start with a capital letter) and word-level candidates (individual
/// place-like words). Every candidate carries the country hints of the
/// detected language; the language name itself is never used as a
/// query.
#[must_use]
pub fn candidates_from_text(text: &str) -> Vec<LocationCandidate> {
    let hint = detect_language(text);
    let mut candidates = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if !is_candidate_line(trimmed) {
            continue;
        }

        let cleaned = clean_query(trimmed);
        let char_count = cleaned.chars().count();
        if !(MIN_LINE_CHARS..=MAX_LINE_CHARS).contains(&char_count)
            || is_excluded_query(&cleaned)
        {
            continue;
        }

        let place_like = looks_like_place_name(&cleaned);
        candidates.push(make_candidate(
            cleaned,
            if place_like {
                PLACE_TEXT_CONFIDENCE
            } else {
                PLAIN_TEXT_CONFIDENCE
            },
            "ocr",
            hint,
        ));
    }

    // Word-level scan: individual words that pass the place-name filter
    // become their own candidates, so a good token inside a noisy line
    // is not lost.
    let mut scanned = 0usize;
    for word in text.split_whitespace() {
        if scanned >= MAX_SCANNED_WORDS {
            break;
        }
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || is_hangul_syllable(*c))
            .collect();
        if cleaned.chars().count() < 2 || !is_candidate_word(&cleaned) {
            continue;
        }
        scanned += 1;
        if looks_like_place_name(&cleaned) && !is_excluded_query(&cleaned) {
            candidates.push(make_candidate(
                cleaned,
                PLACE_TEXT_CONFIDENCE,
                "ocr-keyword",
                hint,
            ));
        }
    }

    candidates
}

fn make_candidate(
    query: String,
    confidence: f64,
    source: &str,
    hint: Option<LanguageHint>,
) -> LocationCandidate {
    LocationCandidate {
        query,
        kind: CandidateKind::Text,
        confidence,
        source: source.to_string(),
        language: hint.map(|h| h.language.to_string()),
        country_hints: hint
            .map(|h| h.countries.iter().map(|c| (*c).to_string()).collect())
            .unwrap_or_default(),
    }
}

/// A line is worth considering when it contains Hangul or starts with a
/// capital Latin letter and has some length to it.
fn is_candidate_line(line: &str) -> bool {
    if line.chars().any(is_hangul_syllable) {
        return true;
    }
    line.chars().next().is_some_and(|c| c.is_ascii_uppercase()) && line.chars().count() > 2
}

fn is_candidate_word(word: &str) -> bool {
    word.chars().any(is_hangul_syllable)
        || word.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Strips everything except word characters, spaces, Hangul and hyphens
/// from a query line.
fn clean_query(line: &str) -> String {
    let stripped: String = line
        .chars()
        .filter(|c| {
            c.is_alphanumeric()
                || *c == '_'
                || *c == ' '
                || *c == '-'
                || is_hangul_syllable(*c)
        })
        .collect();
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_address_line_yields_line_and_word_candidates() {
        let candidates = candidates_from_text("서울특별시 강남구 신사동");

        // The full line matches the Korean city-name pattern.
        let line = candidates
            .iter()
            .find(|c| c.query == "서울특별시 강남구 신사동")
            .expect("line candidate");
        assert!((line.confidence - PLACE_TEXT_CONFIDENCE).abs() < f64::EPSILON);
        assert_eq!(line.kind, CandidateKind::Text);
        assert_eq!(line.language.as_deref(), Some("kor"));
        assert_eq!(line.country_hints, vec!["kr".to_string()]);

        // 강남구 matches the administrative-suffix pattern on its own.
        let word = candidates
            .iter()
            .find(|c| c.query == "강남구")
            .expect("word candidate");
        assert!((word.confidence - 0.85).abs() < f64::EPSILON);
        assert_eq!(word.kind, CandidateKind::Text);
        assert_eq!(word.source, "ocr-keyword");
    }

    #[test]
    fn non_place_capitalized_line_gets_low_confidence() {
        let candidates = candidates_from_text("Welcome to our restaurant menu");
        let line = candidates
            .iter()
            .find(|c| c.source == "ocr")
            .expect("line candidate");
        assert!((line.confidence - PLAIN_TEXT_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn lowercase_line_is_skipped() {
        assert!(candidates_from_text("just some lowercase noise").is_empty());
    }

    #[test]
    fn overlong_line_is_skipped() {
        let long_line = format!("A{}", "x".repeat(60));
        let candidates = candidates_from_text(&long_line);
        assert!(candidates.iter().all(|c| c.source != "ocr"));
    }

    #[test]
    fn number_only_line_is_excluded() {
        assert!(candidates_from_text("12345").is_empty());
    }

    #[test]
    fn word_scan_stops_after_ten_words() {
        // 12 capitalized place-like words; only the first 10 are scanned.
        let text = (0..12)
            .map(|i| format!("Tower{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let candidates = candidates_from_text(&text);
        let keyword_count = candidates
            .iter()
            .filter(|c| c.source == "ocr-keyword")
            .count();
        assert_eq!(keyword_count, 10);
    }

    #[test]
    fn english_candidates_carry_english_hints() {
        let candidates = candidates_from_text("Oxford Street");
        let line = &candidates[0];
        assert_eq!(line.language.as_deref(), Some("eng"));
        assert!(line.country_hints.contains(&"gb".to_string()));
    }
}
