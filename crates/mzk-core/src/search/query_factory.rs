//! Solr query construction
//!
//! A filter query is one parenthesised AND of groups: the base model
//! restriction, the access level, OR-ed licences, OR-ed document types, a
//! publication year range and the facet groups. Facet values within one
//! group are AND-ed, so `authors: ["A", "B"]` finds documents by both.

use chrono::Datelike;

use crate::config::{SearchConfig, DEFAULT_BASE_FILTER};
use crate::error::{ConfigError, QueryError};

use super::label_tables::LabelTables;

/// Relevance query matching every document
pub const MATCH_ALL: &str = "*:*";

const RELEVANCE_FIELDS: &str = "titles.search^20 authors.search^5 keywords.search^3 text_ocr";
const TOP_LEVEL_BOOST: &str = "level:0^10";
const PAGE_PENALTY: &str = "model:page^0.1";

/// One or more filter values. An empty list means "not filtered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValues(Vec<String>);

impl FilterValues {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for FilterValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for FilterValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl<S: Into<String>> From<Vec<S>> for FilterValues {
    fn from(values: Vec<S>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValues {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Search filters; every group is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pub access: Option<String>,
    pub licences: FilterValues,
    pub doctypes: FilterValues,
    pub published_from: Option<i32>,
    pub published_to: Option<i32>,
    pub places: FilterValues,
    pub publishers: FilterValues,
    pub locations: FilterValues,
    pub languages: FilterValues,
    pub keywords: FilterValues,
    pub authors: FilterValues,
    pub geonames: FilterValues,
    pub genres: FilterValues,
    /// Free text for relevance ranking
    pub text_query: Option<String>,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access(mut self, access: impl Into<String>) -> Self {
        self.access = Some(access.into());
        self
    }

    pub fn licences(mut self, licences: impl Into<FilterValues>) -> Self {
        self.licences = licences.into();
        self
    }

    pub fn doctypes(mut self, doctypes: impl Into<FilterValues>) -> Self {
        self.doctypes = doctypes.into();
        self
    }

    pub fn published_from(mut self, year: i32) -> Self {
        self.published_from = Some(year);
        self
    }

    pub fn published_to(mut self, year: i32) -> Self {
        self.published_to = Some(year);
        self
    }

    pub fn places(mut self, places: impl Into<FilterValues>) -> Self {
        self.places = places.into();
        self
    }

    pub fn publishers(mut self, publishers: impl Into<FilterValues>) -> Self {
        self.publishers = publishers.into();
        self
    }

    pub fn locations(mut self, locations: impl Into<FilterValues>) -> Self {
        self.locations = locations.into();
        self
    }

    pub fn languages(mut self, languages: impl Into<FilterValues>) -> Self {
        self.languages = languages.into();
        self
    }

    pub fn keywords(mut self, keywords: impl Into<FilterValues>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn authors(mut self, authors: impl Into<FilterValues>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn geonames(mut self, geonames: impl Into<FilterValues>) -> Self {
        self.geonames = geonames.into();
        self
    }

    pub fn genres(mut self, genres: impl Into<FilterValues>) -> Self {
        self.genres = genres.into();
        self
    }

    pub fn text_query(mut self, text: impl Into<String>) -> Self {
        self.text_query = Some(text.into());
        self
    }

    /// Facet groups with their field prefixes, in query order
    fn facets(&self) -> [(&'static str, &FilterValues); 8] {
        [
            ("publication_places.search:", &self.places),
            ("publishers.search:", &self.publishers),
            ("physical_locations.facet:", &self.locations),
            ("languages.facet:", &self.languages),
            ("keywords.facet:", &self.keywords),
            ("authors.facet:", &self.authors),
            ("geographic_names.search:", &self.geonames),
            ("genres.search:", &self.genres),
        ]
    }
}

/// Encoded `q` (relevance) and `fq` (filter) parameters of a search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub fq: String,
}

impl SearchQuery {
    /// Filter only, every match ranked equally
    pub fn filter(fq: impl Into<String>) -> Self {
        Self {
            q: MATCH_ALL.to_string(),
            fq: fq.into(),
        }
    }
}

/// Builds Solr queries from [`QueryFilters`]
#[derive(Debug, Clone)]
pub struct QueryFactory {
    base_filter: String,
    tables: LabelTables,
}

impl Default for QueryFactory {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_FILTER, LabelTables::default())
    }
}

impl QueryFactory {
    pub fn new(base_filter: impl Into<String>, tables: LabelTables) -> Self {
        Self {
            base_filter: base_filter.into(),
            tables,
        }
    }

    /// Factory using the configured base filter and label tables
    pub fn from_config(config: &SearchConfig) -> Result<Self, ConfigError> {
        let tables = match &config.tag_data_dir {
            Some(dir) => LabelTables::from_dir(dir)?,
            None => LabelTables::default(),
        };
        Ok(Self::new(config.base_filter.clone(), tables))
    }

    pub fn tables(&self) -> &LabelTables {
        &self.tables
    }

    /// The filter expression before encoding
    pub fn filter_expression(&self, filters: &QueryFilters) -> Result<String, QueryError> {
        let mut parts: Vec<String> = Vec::new();

        if !self.base_filter.is_empty() {
            parts.push(self.base_filter.clone());
        }

        if let Some(access) = &filters.access {
            parts.push(self.tables.access(access)?.to_string());
        }

        if !filters.licences.is_empty() {
            let tokens = filters
                .licences
                .iter()
                .map(|l| self.tables.licence(l))
                .collect::<Result<Vec<_>, _>>()?;
            parts.push(format!("({})", tokens.join(" OR ")));
        }

        if !filters.doctypes.is_empty() {
            let tokens = filters
                .doctypes
                .iter()
                .map(|d| self.tables.doctype(d))
                .collect::<Result<Vec<_>, _>>()?;
            parts.push(format!("({})", tokens.join(" OR ")));
        }

        if filters.published_from.is_some() || filters.published_to.is_some() {
            let from = filters.published_from.unwrap_or(0);
            let to = filters.published_to.unwrap_or_else(current_year);
            parts.push(format!(
                "((date_range_start.year:[* TO {}] AND date_range_end.year:[{} TO *]))",
                to, from
            ));
        }

        for (prefix, values) in filters.facets() {
            if values.is_empty() {
                continue;
            }
            let group: Vec<String> = values
                .iter()
                .map(|value| format!("({}\"{}\")", prefix, escape_phrase(value)))
                .collect();
            parts.push(group.join(" AND "));
        }

        Ok(format!("({})", parts.join(" AND ")))
    }

    /// Encoded filter query (`fq`).
    ///
    /// Fails when an access, licence or doctype label is not in the tables.
    pub fn create_query(&self, filters: &QueryFilters) -> Result<String, QueryError> {
        self.filter_expression(filters).map(|fq| encode_query(&fq))
    }

    /// Encoded relevance query (`q`); blank or missing text matches everything
    pub fn relevance_query(text: Option<&str>) -> String {
        match text.map(str::trim) {
            Some(text) if !text.is_empty() => {
                let escaped = text.replace('\\', "\\\\").replace('\'', "\\'");
                encode_query(&format!(
                    "{{!edismax qf='{}' bq='{}' bq='{}' v='{}'}}",
                    RELEVANCE_FIELDS, TOP_LEVEL_BOOST, PAGE_PENALTY, escaped
                ))
            }
            _ => MATCH_ALL.to_string(),
        }
    }

    /// Both request parameters for `filters`
    pub fn build(&self, filters: &QueryFilters) -> Result<SearchQuery, QueryError> {
        let fq = self.create_query(filters)?;
        let q = Self::relevance_query(filters.text_query.as_deref());
        tracing::debug!(%q, %fq, "built search query");
        Ok(SearchQuery { q, fq })
    }
}

/// Escape `\` and `"` so a value stays inside its quoted phrase
fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Percent-encode a query, spaces as `+`, keeping `(`, `)`, `=` and `:`
/// readable
pub fn encode_query(query: &str) -> String {
    // '%' itself encodes to "%25", so restoring these sequences cannot
    // touch an escaped percent sign
    urlencoding::encode(query)
        .replace("%20", "+")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%3D", "=")
        .replace("%3A", ":")
}
