//! Small string helpers shared by the formatters

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Join the present, non-empty parts with `sep`.
///
/// `None` and empty strings are skipped entirely, so no doubled separators
/// appear in the output.
pub fn join_non_empty<I, S>(sep: &str, parts: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut output = String::new();
    for part in parts.into_iter().flatten() {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !output.is_empty() {
            output.push_str(sep);
        }
        output.push_str(part);
    }
    output
}

/// Remove diacritics ("Komenský" -> "Komensky")
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Remove the uncertainty decoration catalogues put around years ("[1631?]" -> "1631")
pub fn strip_date(date: &str) -> String {
    date.chars()
        .filter(|c| !matches!(c, '[' | ']' | '?'))
        .collect()
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_non_empty_skips_blanks() {
        assert_eq!(
            join_non_empty(". ", [Some("a"), None, Some(""), Some("b")]),
            "a. b"
        );
        assert_eq!(join_non_empty(", ", Vec::<Option<&str>>::new()), "");
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("Komenský"), "Komensky");
        assert_eq!(strip_accents("Žluťoučký kůň"), "Zlutoucky kun");
        assert_eq!(strip_accents("plain"), "plain");
    }

    #[test]
    fn test_strip_date() {
        assert_eq!(strip_date("[1631?]"), "1631");
        assert_eq!(strip_date("1890-1900"), "1890-1900");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("labyrint"), "Labyrint");
        assert_eq!(capitalize("SVĚTA"), "Světa");
        assert_eq!(capitalize(""), "");
    }
}
