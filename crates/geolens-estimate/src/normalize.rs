//! Cleanup of raw recognized text before candidate extraction.
//!
//! OCR output is noisy: stray symbols, glued Hangul/Latin runs, missing
//! spaces around digits. Normalization keeps line structure (line
//! candidates depend on it) while tidying each line.

use crate::lang::is_hangul_syllable;

/// Normalizes recognized text line by line.
///
/// Per line: collapse runs of spaces/tabs, strip characters outside
/// word characters, whitespace, Hangul and `-.,()`, insert a space at
/// Hangul↔Latin and digit↔letter boundaries, and uppercase a leading
/// lowercase Latin letter on lines without Hangul. Blank lines are
/// dropped.
#[must_use]
pub fn normalize_recognized_text(text: &str) -> String {
    text.lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    let stripped: String = line
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() || is_hangul_syllable(c) {
                c
            } else if matches!(c, '-' | '.' | ',' | '(' | ')') {
                c
            } else {
                ' '
            }
        })
        .collect();

    let spaced = insert_boundary_spaces(&stripped);

    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    capitalize_latin_start(&collapsed)
}

/// Inserts a space between Hangul↔Latin and digit↔letter transitions.
fn insert_boundary_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if let Some(p) = prev {
            let hangul_latin = (is_hangul_syllable(p) && c.is_ascii_alphabetic())
                || (p.is_ascii_alphabetic() && is_hangul_syllable(c));
            let digit_letter = (p.is_ascii_digit() && (c.is_ascii_alphabetic() || is_hangul_syllable(c)))
                || ((p.is_ascii_alphabetic() || is_hangul_syllable(p)) && c.is_ascii_digit());
            if hangul_latin || digit_letter {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Uppercases a leading lowercase Latin letter, but only on lines with
/// no Hangul — place names are expected to start capitalized.
fn capitalize_latin_start(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first)
            if first.is_ascii_lowercase() && !line.chars().any(is_hangul_syllable) =>
        {
            let mut out = String::with_capacity(line.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_repeated_whitespace_within_lines() {
        assert_eq!(
            normalize_recognized_text("Seoul   Station\t\tExit  3"),
            "Seoul Station Exit 3"
        );
    }

    #[test]
    fn keeps_line_structure() {
        let out = normalize_recognized_text("서울역\n\nMain Street");
        assert_eq!(out, "서울역\nMain Street");
    }

    #[test]
    fn strips_ocr_noise_characters() {
        assert_eq!(
            normalize_recognized_text("Seoul* Station@ #Exit"),
            "Seoul Station Exit"
        );
    }

    #[test]
    fn keeps_useful_punctuation() {
        assert_eq!(
            normalize_recognized_text("Tour Eiffel (Paris), France"),
            "Tour Eiffel (Paris), France"
        );
    }

    #[test]
    fn separates_hangul_and_latin_runs() {
        assert_eq!(normalize_recognized_text("서울Station"), "서울 Station");
        assert_eq!(normalize_recognized_text("Exit출구"), "Exit 출구");
    }

    #[test]
    fn separates_digits_and_letters() {
        assert_eq!(normalize_recognized_text("3번출구"), "3 번출구");
        assert_eq!(normalize_recognized_text("Exit3"), "Exit 3");
    }

    #[test]
    fn capitalizes_lowercase_latin_line_starts() {
        assert_eq!(normalize_recognized_text("main street"), "Main street");
        // Hangul lines are left alone.
        assert_eq!(normalize_recognized_text("강남구 main"), "강남구 main");
    }
}
