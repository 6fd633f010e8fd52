//! Citations for library documents and pages

use mzk_citations::Citation;

use crate::error::Result;
use crate::http::{MzkClient, Transport};
use crate::iiif::{fetch_manifest, locate_page};
use crate::mods::fetch_mods;

/// Builds [`Citation`]s from a document's MODS record and page manifest
pub struct CitationGenerator<'a, T: Transport> {
    client: &'a MzkClient<T>,
}

impl<'a, T: Transport> CitationGenerator<'a, T> {
    pub fn new(client: &'a MzkClient<T>) -> Self {
        Self { client }
    }

    /// Citation for a document, or for one of its pages.
    ///
    /// `Ok(None)` when the metadata cannot be fetched. A fetched record that
    /// is not valid MODS is an error. An unknown page only loses the page
    /// number.
    pub fn citation_for(&self, doc_id: &str, page_id: Option<&str>) -> Result<Option<Citation>> {
        let Some(record) = fetch_mods(self.client, doc_id)? else {
            return Ok(None);
        };

        let page_number = page_id
            .and_then(|page_id| self.page_number(doc_id, page_id))
            .and_then(|index| u32::try_from(index).ok());

        Ok(Some(
            record.into_citation(page_number, self.client.endpoints().view_document_url(doc_id)),
        ))
    }

    /// 0-based position of a page within its document
    pub fn page_number(&self, doc_id: &str, page_id: &str) -> Option<usize> {
        let manifest = fetch_manifest(self.client, doc_id)?;
        let index = locate_page(&manifest, page_id);
        if index.is_none() {
            tracing::debug!(doc_id, page_id, "page not found in manifest");
        }
        index
    }

    /// ISO 690 citation rendered by the library's citation service, as HTML.
    /// With `italic == false` the `<i>` markup is removed.
    pub fn remote_iso690(&self, uuid: &str, italic: bool) -> Option<String> {
        let html = self
            .client
            .get_text(&self.client.endpoints().citation_service_url(uuid))?;
        if italic {
            Some(html)
        } else {
            Some(html.replace("<i>", "").replace("</i>", ""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::error::{MzkError, ParseError};
    use crate::http::{HttpError, HttpResponse};

    const DOC: &str = "11111111-2222-4333-8444-555555555555";
    const PAGE: &str = "aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee";

    /// Answers by URL substring; anything else is a 404
    struct Routes(Vec<(&'static str, String)>);

    impl Transport for Routes {
        fn get(&self, url: &str) -> std::result::Result<HttpResponse, HttpError> {
            Ok(self
                .0
                .iter()
                .find(|(needle, _)| url.contains(needle))
                .map(|(_, body)| HttpResponse::ok(body.clone()))
                .unwrap_or_else(|| HttpResponse::new(404, "")))
        }
    }

    fn mods() -> String {
        r#"<modsCollection xmlns="http://www.loc.gov/mods/v3"><mods>
            <titleInfo><title>Orbis pictus</title></titleInfo>
            <name type="personal" usage="primary"><namePart>Komenský, Jan Amos</namePart></name>
            <originInfo><dateIssued>1658</dateIssued></originInfo>
        </mods></modsCollection>"#
            .to_string()
    }

    fn manifest() -> String {
        format!(
            r#"{{"id": "doc", "items": [
                {{"label": {{"none": ["[1] (FrontCover)"]}}, "thumbnail": [{{"id": "https://x/uuid:00000000-0000-4000-8000-000000000000/thumb"}}]}},
                {{"label": {{"none": ["[2] (NormalPage)"]}}, "thumbnail": [{{"id": "https://x/uuid:{}/thumb"}}]}}
            ]}}"#,
            PAGE
        )
    }

    fn client(routes: Vec<(&'static str, String)>) -> MzkClient<Routes> {
        MzkClient::new(Routes(routes), EndpointConfig::default())
    }

    #[test]
    fn test_citation_for_page() {
        let client = client(vec![("/metadata/mods", mods()), ("iiif.digitalniknihovna.cz", manifest())]);
        let citation = CitationGenerator::new(&client)
            .citation_for(DOC, Some(PAGE))
            .unwrap()
            .unwrap();

        assert_eq!(citation.title(), Some("Orbis pictus"));
        assert_eq!(citation.authors()[0].family.as_deref(), Some("Komenský"));
        assert_eq!(citation.page_numbers().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            citation.document_url(),
            Some(format!("https://www.digitalniknihovna.cz/mzk/uuid/uuid:{}", DOC).as_str())
        );
    }

    #[test]
    fn test_citation_for_document_skips_manifest() {
        let client = client(vec![("/metadata/mods", mods())]);
        let citation = CitationGenerator::new(&client)
            .citation_for(DOC, None)
            .unwrap()
            .unwrap();
        assert!(citation.page_numbers().is_empty());
    }

    #[test]
    fn test_unknown_page_drops_page_number() {
        let client = client(vec![("/metadata/mods", mods()), ("iiif.digitalniknihovna.cz", manifest())]);
        let citation = CitationGenerator::new(&client)
            .citation_for(DOC, Some("ffffffff-ffff-4fff-8fff-ffffffffffff"))
            .unwrap()
            .unwrap();
        assert!(citation.page_numbers().is_empty());
    }

    #[test]
    fn test_metadata_unavailable_is_none() {
        let client = client(vec![]);
        assert!(CitationGenerator::new(&client)
            .citation_for(DOC, None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_invalid_metadata_is_error() {
        let client = client(vec![("/metadata/mods", "<html><body>".to_string())]);
        let err = CitationGenerator::new(&client)
            .citation_for(DOC, None)
            .unwrap_err();
        assert!(matches!(err, MzkError::Parse(ParseError::Xml(_))));
    }

    #[test]
    fn test_remote_iso690_italic() {
        let html = "KOMENSKÝ, Jan Amos. <i>Orbis pictus</i>. 1658.".to_string();
        let client = client(vec![("citace.kramerius.cloud", html.clone())]);
        let generator = CitationGenerator::new(&client);

        assert_eq!(generator.remote_iso690(DOC, true), Some(html));
        assert_eq!(
            generator.remote_iso690(DOC, false).as_deref(),
            Some("KOMENSKÝ, Jan Amos. Orbis pictus. 1658.")
        );
    }

    #[test]
    fn test_page_number_without_manifest() {
        let client = client(vec![]);
        assert_eq!(CitationGenerator::new(&client).page_number(DOC, PAGE), None);
    }
}
