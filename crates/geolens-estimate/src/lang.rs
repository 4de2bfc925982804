//! Script-based language detection with country-hint mapping.
//!
//! A deterministic priority cascade over character classes. Korean is
//! checked first and a single Hangul character forces `kor` regardless
//! of the overall script ratio — a deliberate product decision, not a
//! ratio-based detector. Latin-script languages additionally require a
//! stopword match, since accented characters alone are shared across
//! them.

/// A detected language with its associated country hints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageHint {
    /// ISO 639-3 language code.
    pub language: &'static str,
    /// ISO country codes where the language dominates, most likely
    /// first.
    pub countries: &'static [&'static str],
    /// Prior confidence of the country association. Scripts unique to
    /// one country rank highest; English is the weakest signal.
    pub priority: f64,
}

const KOR: LanguageHint = LanguageHint {
    language: "kor",
    countries: &["kr"],
    priority: 1.0,
};
const CMN: LanguageHint = LanguageHint {
    language: "cmn",
    countries: &["cn", "tw", "hk"],
    priority: 0.9,
};
const FRA: LanguageHint = LanguageHint {
    language: "fra",
    countries: &["fr", "be", "ch", "ca", "lu", "mc"],
    priority: 0.9,
};
const DEU: LanguageHint = LanguageHint {
    language: "deu",
    countries: &["de", "at", "ch", "li"],
    priority: 0.9,
};
const SPA: LanguageHint = LanguageHint {
    language: "spa",
    countries: &["es", "mx", "ar", "co", "cl", "pe"],
    priority: 0.9,
};
const ITA: LanguageHint = LanguageHint {
    language: "ita",
    countries: &["it", "ch", "sm", "va"],
    priority: 0.9,
};
const POR: LanguageHint = LanguageHint {
    language: "por",
    countries: &["pt", "br", "ao", "mz"],
    priority: 0.9,
};
const RUS: LanguageHint = LanguageHint {
    language: "rus",
    countries: &["ru", "by", "kz", "kg"],
    priority: 0.9,
};
const ARA: LanguageHint = LanguageHint {
    language: "ara",
    countries: &[
        "sa", "ae", "eg", "iq", "jo", "kw", "lb", "ma", "om", "qa", "sy", "tn", "ye",
    ],
    priority: 0.9,
};
const ENG: LanguageHint = LanguageHint {
    language: "eng",
    countries: &["us", "gb", "ca", "au", "nz", "ie"],
    priority: 0.7,
};

/// Detects the dominant language of recognized text.
///
/// Returns `None` for text shorter than 2 characters after trimming.
/// Unrecognized scripts fall back to English.
#[must_use]
pub fn detect_language(text: &str) -> Option<LanguageHint> {
    let trimmed = text.trim();
    if trimmed.chars().count() < 2 {
        return None;
    }

    // Hangul wins unconditionally: syllables or bare jamo.
    if trimmed
        .chars()
        .any(|c| is_hangul_syllable(c) || is_hangul_jamo(c))
    {
        return Some(KOR);
    }

    // CJK ideographs without Hangul: Chinese.
    if trimmed.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c)) {
        return Some(CMN);
    }

    let lower = trimmed.to_lowercase();

    // Latin-script languages: accented character class plus a stopword
    // from the language, since the accent sets overlap.
    const FRA_STOPWORDS: &[&str] = &[
        "le", "la", "les", "de", "du", "des", "et", "est", "dans", "pour", "avec", "sur", "sous",
    ];
    const DEU_STOPWORDS: &[&str] = &[
        "der", "die", "das", "und", "ist", "sind", "von", "zu", "mit", "auf",
    ];
    const SPA_STOPWORDS: &[&str] = &[
        "el", "la", "los", "las", "del", "de", "en", "es", "con", "por",
    ];
    const ITA_STOPWORDS: &[&str] = &[
        "il", "la", "gli", "le", "di", "del", "della", "con", "per", "in",
    ];
    const POR_STOPWORDS: &[&str] = &[
        "o", "a", "os", "as", "de", "do", "da", "dos", "das", "em", "no", "na", "com", "por",
    ];

    let checks: &[(&str, &[&str], LanguageHint)] = &[
        ("àâäéèêëïîôùûüÿç", FRA_STOPWORDS, FRA),
        ("äöüß", DEU_STOPWORDS, DEU),
        ("áéíóúñ", SPA_STOPWORDS, SPA),
        ("àèéìíîòóùú", ITA_STOPWORDS, ITA),
        ("àáâãéêíóôõú", POR_STOPWORDS, POR),
    ];
    for (accents, stopwords, hint) in checks {
        if lower.chars().any(|c| accents.contains(c)) && has_word(&lower, stopwords) {
            return Some(*hint);
        }
    }

    if lower.chars().any(|c| ('\u{0430}'..='\u{044F}').contains(&c) || c == 'ё') {
        return Some(RUS);
    }
    if trimmed.chars().any(|c| ('\u{0627}'..='\u{064A}').contains(&c)) {
        return Some(ARA);
    }

    Some(ENG)
}

pub(crate) fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

fn is_hangul_jamo(c: char) -> bool {
    ('ㄱ'..='ㅎ').contains(&c) || ('ㅏ'..='ㅣ').contains(&c)
}

fn has_word(lower: &str, words: &[&str]) -> bool {
    lower
        .split(|c: char| !c.is_alphabetic())
        .any(|w| words.contains(&w))
}
