//! Citation generation against scripted backend responses

mod common;

use common::fixtures::{load_manifest_fixture, load_mods_fixture, load_response_fixture};
use common::mock::MockTransport;
use insta::assert_snapshot;
use mzk_citations::{bibtex_citations, group_by_document, Author, BibTeXOptions, DefaultTagGenerator};
use mzk_core::{parse_mods, CitationGenerator, MzkError, ParseError};

const DOC: &str = "0d3c0f0a-0000-4000-8000-000000000001";
const TITLE_PAGE: &str = "5a1e0000-0000-4000-8000-000000000002";
const TEXT_PAGE: &str = "5a1e0000-0000-4000-8000-000000000003";

fn library() -> MockTransport {
    MockTransport::new()
        .route("/metadata/mods", load_mods_fixture("labyrint.xml"))
        .route("iiif.digitalniknihovna.cz", load_manifest_fixture("labyrint_manifest.json"))
        .route("citace.kramerius.cloud", load_response_fixture("citation.html"))
}

#[test]
fn test_mods_fixture_fields() {
    let record = parse_mods(&load_mods_fixture("labyrint.xml")).unwrap();

    assert_eq!(
        record.authors,
        vec![Author::full("Jan Amos", "Komenský"), Author::full("Josef", "Hrubý")]
    );
    assert_eq!(record.title.as_deref(), Some("Labyrint světa a ráj srdce"));
    assert_eq!(record.subtitle.as_deref(), Some("to jest světlé vymalování"));
    assert_eq!(record.place_issued.as_deref(), Some("Praha"));
    assert_eq!(record.publisher.as_deref(), Some("Jan Laichter"));
    assert_eq!(record.date_issued.as_deref(), Some("[1910?]"));
    assert_eq!(record.identifiers.len(), 3);
    assert_eq!(record.identifiers["ccnb"], "cnb000356107");
}

#[test]
fn test_bare_mods_root() {
    let record = parse_mods(&load_mods_fixture("anonymous.xml")).unwrap();

    assert_eq!(record.authors, vec![Author::given_only("Dalimil")]);
    assert_eq!(record.title, None);
    assert_eq!(record.identifiers.get("").map(String::as_str), Some("no-type"));
}

#[test]
fn test_non_mods_document_rejected() {
    assert_eq!(
        parse_mods(&load_mods_fixture("not_mods.xml")),
        Err(ParseError::MissingElement("mods"))
    );
}

#[test]
fn test_page_citation_iso690() {
    let client = library().client();
    let citation = CitationGenerator::new(&client)
        .citation_for(DOC, Some(TEXT_PAGE))
        .unwrap()
        .unwrap();

    assert_eq!(
        citation.to_iso690(),
        "KOMENSKÝ, Jan Amos; HRUBÝ, Josef. Labyrint světa a ráj srdce: to jest světlé vymalování. \
         Praha: Jan Laichter, [1910?], s. [2]. ISBN: 80-85-000-00-0. \
         Dostupné také z: https://www.digitalniknihovna.cz/mzk/uuid/uuid:0d3c0f0a-0000-4000-8000-000000000001"
    );

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].ends_with("uuid:0d3c0f0a-0000-4000-8000-000000000001/metadata/mods"));
    assert!(requests[1].starts_with("https://iiif.digitalniknihovna.cz/mzk/uuid:"));
}

#[test]
fn test_grouped_pages_render_as_one_bibtex_record() {
    let client = library().client();
    let generator = CitationGenerator::new(&client);
    let citations: Vec<_> = [TEXT_PAGE, TITLE_PAGE]
        .iter()
        .map(|page| generator.citation_for(DOC, Some(page)).unwrap().unwrap())
        .collect();

    let grouped = group_by_document(&citations);
    assert_eq!(grouped.len(), 1);

    let output = bibtex_citations(&grouped, &BibTeXOptions::default(), &DefaultTagGenerator);
    assert_snapshot!(output, @r"
    @misc{Komensky1910,
        author = {Jan Amos Komenský and Josef Hrubý},
        title = {Labyrint světa a ráj srdce},
        subtitle = {to jest světlé vymalování},
        publisher = {Jan Laichter},
        year = {[1910?]},
        pages = {1, 2},
        isbn = {80-85-000-00-0},
        url = {https://www.digitalniknihovna.cz/mzk/uuid/uuid:0d3c0f0a-0000-4000-8000-000000000001}
    }
    ");
}

#[test]
fn test_metadata_server_error_is_none() {
    let client = MockTransport::new()
        .status("/metadata/mods", 500, "Internal Server Error")
        .client();
    assert!(CitationGenerator::new(&client)
        .citation_for(DOC, None)
        .unwrap()
        .is_none());
}

#[test]
fn test_metadata_transport_failure_is_none() {
    let client = MockTransport::new().fail("/metadata/mods").client();
    assert!(CitationGenerator::new(&client)
        .citation_for(DOC, Some(TEXT_PAGE))
        .unwrap()
        .is_none());
}

#[test]
fn test_unexpected_metadata_is_parse_error() {
    let client = MockTransport::new()
        .route("/metadata/mods", load_mods_fixture("not_mods.xml"))
        .client();
    let err = CitationGenerator::new(&client)
        .citation_for(DOC, None)
        .unwrap_err();
    assert!(matches!(err, MzkError::Parse(ParseError::MissingElement("mods"))));
}

#[test]
fn test_manifest_unavailable_keeps_citation() {
    let client = MockTransport::new()
        .route("/metadata/mods", load_mods_fixture("labyrint.xml"))
        .client();
    let citation = CitationGenerator::new(&client)
        .citation_for(DOC, Some(TEXT_PAGE))
        .unwrap()
        .unwrap();
    assert!(citation.page_numbers().is_empty());
    assert!(citation.to_iso690().contains("[1910?]. ISBN"));
}

#[test]
fn test_remote_citation_without_italics() {
    let client = library().client();
    let html = CitationGenerator::new(&client)
        .remote_iso690(DOC, false)
        .unwrap();
    assert!(html.starts_with("KOMENSKÝ, Jan Amos. Labyrint světa a ráj srdce. Praha"));
    assert!(!html.contains("<i>"));
}
