//! ISO 690 citation rendering
//!
//! Produces the Czech flavour of ISO 690 used by the library's own citation
//! service: `AUTHOR, Given. Title: Subtitle. Place: Publisher, date, s. [pages]. ISBN: ... . Dostupné také z: url`.

use crate::citation::Citation;
use crate::text::join_non_empty;

/// Prefix placed before the document URL ("Also available from:")
pub const URL_PREFIX: &str = "Dostupné také z: ";

/// Author part used when a citation has no authors at all
pub const ANONYMOUS: &str = "Anon";

/// Render `citation` as an ISO 690 string.
///
/// Parts that come out empty are left out together with their separator.
pub fn format_iso690(citation: &Citation) -> String {
    join_non_empty(
        ". ",
        [
            Some(author_part(citation)),
            title_part(citation),
            Some(issued_and_page_part(citation)),
            identifier_part(citation, "isbn"),
            url_part(citation),
        ],
    )
}

fn author_part(citation: &Citation) -> String {
    if citation.authors().is_empty() {
        return ANONYMOUS.to_string();
    }

    let names: Vec<String> = citation
        .authors()
        .iter()
        .filter_map(|author| match (&author.given, &author.family) {
            (Some(given), Some(family)) => Some(format!("{}, {}", family.to_uppercase(), given)),
            (Some(given), None) => Some(given.clone()),
            (None, Some(family)) => Some(family.to_uppercase()),
            (None, None) => None,
        })
        .collect();

    names.join("; ")
}

fn title_part(citation: &Citation) -> Option<String> {
    match (citation.title(), citation.subtitle()) {
        (Some(title), Some(subtitle)) => Some(format!("{}: {}", title, subtitle)),
        (Some(title), None) => Some(title.to_string()),
        (None, subtitle) => subtitle.map(str::to_string),
    }
}

fn issued_and_page_part(citation: &Citation) -> String {
    let place = match (citation.place_issued(), citation.publisher()) {
        (Some(place), Some(publisher)) => Some(format!("{}: {}", place, publisher)),
        _ => None,
    };

    join_non_empty(
        ", ",
        [
            place,
            citation.date_issued().map(str::to_string),
            pages_part(citation),
        ],
    )
}

fn pages_part(citation: &Citation) -> Option<String> {
    if citation.page_numbers().is_empty() {
        return None;
    }
    // BTreeSet iterates in ascending order
    let pages: Vec<String> = citation
        .page_numbers()
        .iter()
        .map(|page| page.to_string())
        .collect();
    Some(format!("s. [{}]", pages.join(", ")))
}

fn identifier_part(citation: &Citation, kind: &str) -> Option<String> {
    citation
        .identifier(kind)
        .filter(|value| !value.is_empty())
        .map(|value| format!("{}: {}", kind.to_uppercase(), value))
}

fn url_part(citation: &Citation) -> Option<String> {
    citation
        .document_url()
        .map(|url| format!("{}{}", URL_PREFIX, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::Author;

    #[test]
    fn test_komensky_end_to_end() {
        let citation = Citation::builder()
            .author(("Jan", "Komenský"))
            .title("Labyrint světa")
            .date_issued("1631")
            .page_numbers([5, 3, 5])
            .build();
        assert_eq!(
            format_iso690(&citation),
            "KOMENSKÝ, Jan. Labyrint světa. 1631, s. [3, 5]"
        );
    }

    #[test]
    fn test_anonymous_when_no_authors() {
        let citation = Citation::builder().title("Kronika").build();
        assert_eq!(format_iso690(&citation), "Anon. Kronika");
    }

    #[test]
    fn test_author_variants() {
        let citation = Citation::builder()
            .author(Author::full("Jan", "Hus"))
            .author(Author::given_only("Petr"))
            .author(Author::family_only("Chelčický"))
            .author(Author::default())
            .build();
        assert_eq!(format_iso690(&citation), "HUS, Jan; Petr; CHELČICKÝ");
    }

    #[test]
    fn test_full_record() {
        let citation = Citation::builder()
            .author(("Jan Amos", "Komenský"))
            .title("Orbis sensualium pictus")
            .subtitle("hoc est omnium principalium in mundo rerum")
            .place_issued("Norimberga")
            .publisher("Endter")
            .date_issued("[1658?]")
            .page_number(12)
            .identifier("isbn", "80-7106-000-0")
            .identifier("uuid", "uuid:abc")
            .document_url("https://www.digitalniknihovna.cz/mzk/uuid/uuid:abc")
            .build();
        assert_eq!(
            format_iso690(&citation),
            "KOMENSKÝ, Jan Amos. Orbis sensualium pictus: hoc est omnium principalium in mundo rerum. \
             Norimberga: Endter, [1658?], s. [12]. ISBN: 80-7106-000-0. \
             Dostupné také z: https://www.digitalniknihovna.cz/mzk/uuid/uuid:abc"
        );
    }

    #[test]
    fn test_place_requires_publisher() {
        let citation = Citation::builder()
            .author(Author::family_only("Hus"))
            .place_issued("Praha")
            .date_issued("1413")
            .build();
        assert_eq!(format_iso690(&citation), "HUS. 1413");
    }

    #[test]
    fn test_no_doubled_separators_when_parts_missing() {
        let citation = Citation::builder()
            .author(Author::default())
            .document_url("https://example.org/doc")
            .build();
        let rendered = format_iso690(&citation);
        assert!(!rendered.contains(". . "));
        assert_eq!(rendered, "Dostupné také z: https://example.org/doc");
    }

    #[test]
    fn test_empty_isbn_is_omitted() {
        let citation = Citation::builder()
            .title("Bible kralická")
            .identifier("isbn", "")
            .build();
        assert_eq!(format_iso690(&citation), "Anon. Bible kralická");
    }
}
