//! "Looks like a place name" heuristics for text candidates.

use regex::Regex;

/// Korean administrative suffixes, landmark suffixes, city names,
/// English street/landmark forms, and lot-number patterns. A match
/// earns a candidate the high text prior (0.85); everything else gets
/// the low one (0.3).
#[must_use]
pub(crate) fn looks_like_place_name(text: &str) -> bool {
    if text.chars().count() < 2 {
        return false;
    }

    let patterns = [
        // Korean administrative suffix: 서울시, 강남구, 신사동, ...
        r"^[가-힣]+(시|도|군|구|동|리|로|길|가|면|읍)$",
        // English street/landmark form: "Oxford Street", "Namsan Tower".
        r"(?i)^[A-Z][a-z]+ (Street|Avenue|Road|Park|Tower|Building|Palace|Temple|Church|Bridge|Station|Airport)$",
        // Korean landmark suffix: 경복궁, 롯데타워, 남대문, ...
        r"^[가-힣]+(궁|사|원|관|타워|빌딩|센터|공원|광장|다리|역|공항|박물관|미술관|성|문)$",
        // Korean region and city names anywhere in the text.
        r"서울|부산|대구|인천|광주|대전|울산|제주|경기|강원|충북|충남|전북|전남|경북|경남|수원|성남|고양|용인|부천|안산|안양|평택|시흥|김포|의정부|광명|파주|이천|오산|구리|안성|포천|의왕|하남|양주|남양주|화성|가평|양평|여주",
        // Short all-Hangul run: typical Korean place-name length.
        r"^[가-힣]{2,10}$",
        // Single capitalized Latin word.
        r"^[A-Z][a-z]+$",
        // Korean lot/unit numbers.
        r"\d+번지|\d+호",
    ];

    if patterns.iter().any(|p| {
        Regex::new(p)
            .expect("valid place-name regex")
            .is_match(text)
    }) {
        return true;
    }

    // Common landmark nouns anywhere in the text.
    const PLACE_NOUNS: &[&str] = &[
        "타워", "빌딩", "센터", "공원", "광장", "다리", "역", "공항", "궁", "사", "원", "관",
        "성", "문", "박물관", "미술관", "Tower", "Building", "Center", "Park", "Square",
        "Bridge", "Station", "Airport", "Palace", "Temple", "Church", "Museum",
    ];
    PLACE_NOUNS.iter().any(|noun| text.contains(noun))
}

/// Lines and words that are never useful as search queries.
pub(crate) fn is_excluded_query(text: &str) -> bool {
    let patterns = [
        // Digits only.
        r"^\d+$",
        // One or two bare capital letters.
        r"^[A-Z]{1,2}$",
        // English function words.
        r"(?i)^(the|a|an|is|are|was|were|be|been|being|have|has|had|do|does|did|will|would|should|could|may|might|can|must)$",
        // Korean demonstratives.
        r"^(이|그|저|이것|그것|저것|여기|거기|저기)$",
        // A bare address unit with no name attached.
        r"^(시|도|군|구|동|리|로|길|가)$",
    ];
    patterns.iter().any(|p| {
        Regex::new(p)
            .expect("valid exclusion regex")
            .is_match(text)
    })
}
