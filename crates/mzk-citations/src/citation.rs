//! Citation data model
//!
//! A [`Citation`] is built once per metadata fetch and never changes
//! afterwards. Derived citations (for example grouped page citations) are
//! new values produced through [`CitationBuilder`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A person credited on a document.
///
/// Either name part may be missing; library metadata is not consistent about
/// splitting names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub given: Option<String>,
    pub family: Option<String>,
}

impl Author {
    pub fn new(given: Option<String>, family: Option<String>) -> Self {
        Self { given, family }
    }

    /// Author with both given and family name
    pub fn full(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self::new(Some(given.into()), Some(family.into()))
    }

    pub fn given_only(given: impl Into<String>) -> Self {
        Self::new(Some(given.into()), None)
    }

    pub fn family_only(family: impl Into<String>) -> Self {
        Self::new(None, Some(family.into()))
    }

    /// True when neither name part is present
    pub fn is_empty(&self) -> bool {
        self.given.is_none() && self.family.is_none()
    }

    /// "Given Family", skipping missing parts
    pub fn display_name(&self) -> String {
        crate::text::join_non_empty(" ", [self.given.as_deref(), self.family.as_deref()])
    }
}

impl From<(&str, &str)> for Author {
    fn from((given, family): (&str, &str)) -> Self {
        Self::full(given, family)
    }
}

/// Everything needed to cite a document or a set of its pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    authors: Vec<Author>,
    title: Option<String>,
    subtitle: Option<String>,
    publisher: Option<String>,
    place_issued: Option<String>,
    date_issued: Option<String>,
    page_numbers: BTreeSet<u32>,
    identifiers: BTreeMap<String, String>,
    document_url: Option<String>,
}

impl Citation {
    pub fn builder() -> CitationBuilder {
        CitationBuilder::default()
    }

    /// Start a builder pre-filled with this citation's fields
    pub fn to_builder(&self) -> CitationBuilder {
        CitationBuilder {
            inner: self.clone(),
        }
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn place_issued(&self) -> Option<&str> {
        self.place_issued.as_deref()
    }

    pub fn date_issued(&self) -> Option<&str> {
        self.date_issued.as_deref()
    }

    /// Page numbers in ascending order
    pub fn page_numbers(&self) -> &BTreeSet<u32> {
        &self.page_numbers
    }

    pub fn identifiers(&self) -> &BTreeMap<String, String> {
        &self.identifiers
    }

    pub fn identifier(&self, kind: &str) -> Option<&str> {
        self.identifiers.get(kind).map(String::as_str)
    }

    pub fn document_url(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    /// Render as an ISO 690 citation string
    pub fn to_iso690(&self) -> String {
        crate::iso690::format_iso690(self)
    }
}

/// Builder for [`Citation`].
#[derive(Clone, Debug, Default)]
pub struct CitationBuilder {
    inner: Citation,
}

impl CitationBuilder {
    pub fn author(mut self, author: impl Into<Author>) -> Self {
        self.inner.authors.push(author.into());
        self
    }

    pub fn authors(mut self, authors: impl IntoIterator<Item = Author>) -> Self {
        self.inner.authors = authors.into_iter().collect();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.inner.subtitle = Some(subtitle.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.inner.publisher = Some(publisher.into());
        self
    }

    pub fn place_issued(mut self, place: impl Into<String>) -> Self {
        self.inner.place_issued = Some(place.into());
        self
    }

    pub fn date_issued(mut self, date: impl Into<String>) -> Self {
        self.inner.date_issued = Some(date.into());
        self
    }

    /// Add page numbers; `None` entries are dropped.
    ///
    /// Accepts plain numbers as well as `Option<u32>`.
    pub fn page_numbers<P>(mut self, pages: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<Option<u32>>,
    {
        self.inner
            .page_numbers
            .extend(pages.into_iter().filter_map(Into::into));
        self
    }

    pub fn page_number(self, page: impl Into<Option<u32>>) -> Self {
        self.page_numbers([page.into()])
    }

    /// Set an identifier; a later value for the same type replaces the earlier one
    pub fn identifier(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.identifiers.insert(kind.into(), value.into());
        self
    }

    pub fn identifiers(mut self, identifiers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.inner.identifiers.extend(identifiers);
        self
    }

    pub fn document_url(mut self, url: impl Into<String>) -> Self {
        self.inner.document_url = Some(url.into());
        self
    }

    // Option-taking variants for callers that already hold parsed optionals.

    pub fn maybe_title(mut self, title: Option<String>) -> Self {
        self.inner.title = title;
        self
    }

    pub fn maybe_subtitle(mut self, subtitle: Option<String>) -> Self {
        self.inner.subtitle = subtitle;
        self
    }

    pub fn maybe_publisher(mut self, publisher: Option<String>) -> Self {
        self.inner.publisher = publisher;
        self
    }

    pub fn maybe_place_issued(mut self, place: Option<String>) -> Self {
        self.inner.place_issued = place;
        self
    }

    pub fn maybe_date_issued(mut self, date: Option<String>) -> Self {
        self.inner.date_issued = date;
        self
    }

    pub fn build(self) -> Citation {
        self.inner
    }
}
