//! Keyword derivation from reverse-geocoded place names.

/// Maximum derived text-search queries per aggregation request.
pub(crate) const MAX_DERIVED_QUERIES: usize = 3;

/// Extracts up to two search keywords from a display name.
///
/// The first comma-separated segment is the most specific name, the
/// second the city/region. Single-character segments carry no search
/// value and are dropped.
pub(crate) fn location_keywords(display_name: &str) -> Vec<String> {
    display_name
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(2)
        .filter(|part| part.chars().count() > 1)
        .map(ToString::to_string)
        .collect()
}

/// Builds street/road text-search queries from the keywords.
///
/// The most specific keyword gets both a "street" and a "road" variant;
/// the second keyword gets a "street" variant.
pub(crate) fn derived_queries(keywords: &[String]) -> Vec<String> {
    let mut queries = Vec::new();
    if let Some(first) = keywords.first() {
        queries.push(format!("{first} street"));
        queries.push(format!("{first} road"));
    }
    if let Some(second) = keywords.get(1) {
        queries.push(format!("{second} street"));
    }
    queries.truncate(MAX_DERIVED_QUERIES);
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_two_segments() {
        let keywords = location_keywords("Sinsa-dong, Gangnam-gu, Seoul, South Korea");
        assert_eq!(keywords, vec!["Sinsa-dong", "Gangnam-gu"]);
    }

    #[test]
    fn drops_single_character_segments() {
        let keywords = location_keywords("X, Paris, France");
        assert_eq!(keywords, vec!["Paris"]);
    }

    #[test]
    fn empty_name_yields_nothing() {
        assert!(location_keywords("").is_empty());
        assert!(derived_queries(&[]).is_empty());
    }

    #[test]
    fn two_keywords_produce_three_queries() {
        let queries = derived_queries(&["Sinsa-dong".to_string(), "Gangnam-gu".to_string()]);
        assert_eq!(
            queries,
            vec![
                "Sinsa-dong street".to_string(),
                "Sinsa-dong road".to_string(),
                "Gangnam-gu street".to_string(),
            ]
        );
    }

    #[test]
    fn one_keyword_produces_two_queries() {
        let queries = derived_queries(&["Paris".to_string()]);
        assert_eq!(
            queries,
            vec!["Paris street".to_string(), "Paris road".to_string()]
        );
    }
}
