//! IIIF page manifests
//!
//! A document's manifest lists its pages in reading order. Each item has a
//! label (`{"none": ["[1] (TitlePage)"]}`) and a thumbnail whose id embeds
//! the page UUID. This module finds a page's position in that list and
//! turns the manifest into [`PageData`] records.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::EndpointConfig;
use crate::error::ParseError;
use crate::http::{MzkClient, Transport};

lazy_static! {
    static ref UUID_PATTERN: Regex =
        Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap();
    static ref UPPER_RUN: Regex = Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap();
    static ref LOWER_UPPER: Regex = Regex::new(r"([a-z\d])([A-Z])").unwrap();
}

/// First UUID found in `text`
pub fn extract_uuid(text: &str) -> Option<&str> {
    UUID_PATTERN.find(text).map(|m| m.as_str())
}

/// A document manifest. Items stay raw until read, so one malformed page
/// does not hide the others.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

impl Manifest {
    /// Check the top-level shape of a parsed JSON manifest
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParseError> {
        serde_json::from_value(value).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// Decode every item, in manifest order
    pub fn pages(&self) -> impl Iterator<Item = Result<ManifestItem, ParseError>> + '_ {
        self.items.iter().map(ManifestItem::from_value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestItem {
    pub label: Option<ItemLabel>,
    #[serde(default)]
    pub thumbnail: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemLabel {
    #[serde(default)]
    pub none: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub id: String,
}

impl ManifestItem {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ParseError> {
        ManifestItem::deserialize(value).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// UUID of the page image, taken from the first thumbnail
    pub fn image_uuid(&self) -> Option<&str> {
        self.thumbnail.first().and_then(|t| extract_uuid(&t.id))
    }

    pub fn labels(&self) -> &[String] {
        self.label.as_ref().map(|l| l.none.as_slice()).unwrap_or_default()
    }
}

/// 0-based position of `page_uuid` in the manifest.
///
/// Items that fail to decode or carry no image UUID are passed over.
/// `None` when no page matches or the manifest is empty.
pub fn locate_page(manifest: &Manifest, page_uuid: &str) -> Option<usize> {
    for (index, item) in manifest.pages().enumerate() {
        let Ok(item) = item else {
            tracing::debug!(index, "skipping undecodable manifest item");
            continue;
        };
        if item.image_uuid() == Some(page_uuid) {
            return Some(index);
        }
    }
    None
}

/// [`locate_page`] on raw JSON; a manifest of the wrong shape is simply "not found"
pub fn locate_page_in_json(manifest: &serde_json::Value, page_uuid: &str) -> Option<usize> {
    let manifest = Manifest::from_value(manifest.clone()).ok()?;
    locate_page(&manifest, page_uuid)
}

// ===== Page listing =====

/// One page of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    /// Document id
    pub source: String,
    /// Page image UUID
    #[serde(rename = "img_id")]
    pub page_id: String,
    pub label: String,
    #[serde(rename = "id")]
    pub system_id: Option<u32>,
}

impl PageData {
    pub fn new(source: impl Into<String>, page_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page_id: page_id.into(),
            label: label.into(),
            system_id: None,
        }
    }

    /// Public viewer link opening the document at this page
    pub fn viewer_url(&self, endpoints: &EndpointConfig) -> String {
        endpoints.view_page_url(&self.source, &self.page_id)
    }
}

/// Turns a raw manifest label into the label used for filtering.
/// Returning `None` skips the page.
pub trait LabelPreprocessor {
    fn preprocess(&self, raw: &str) -> Option<String>;
}

/// Formats a preprocessed label for output
pub trait LabelFormatter {
    fn format(&self, label: &str) -> String;
}

impl<F> LabelPreprocessor for F
where
    F: Fn(&str) -> Option<String>,
{
    fn preprocess(&self, raw: &str) -> Option<String> {
        self(raw)
    }
}

impl<F> LabelFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format(&self, label: &str) -> String {
        self(label)
    }
}

/// Default preprocessing: `"[5] (TitlePage)"` -> `"TitlePage"`.
///
/// Takes the second space-separated token and drops parentheses.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripPageLabel;

impl LabelPreprocessor for StripPageLabel {
    fn preprocess(&self, raw: &str) -> Option<String> {
        raw.split(' ')
            .nth(1)
            .map(|token| token.replace(['(', ')'], ""))
    }
}

/// Default formatting: `"TitlePage"` -> `"title_page"`
#[derive(Debug, Clone, Copy, Default)]
pub struct Underscore;

impl LabelFormatter for Underscore {
    fn format(&self, label: &str) -> String {
        underscore(label)
    }
}

/// CamelCase to snake_case, dashes become underscores
pub fn underscore(word: &str) -> String {
    let word = UPPER_RUN.replace_all(word, "${1}_${2}");
    let word = LOWER_UPPER.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// How [`extract_pages`] treats labels
pub struct PageListOptions<'a> {
    /// Keep only pages whose preprocessed label is listed; `None` keeps all
    pub valid_labels: Option<&'a [String]>,
    pub preprocessor: &'a dyn LabelPreprocessor,
    pub formatter: &'a dyn LabelFormatter,
}

impl Default for PageListOptions<'_> {
    fn default() -> Self {
        Self {
            valid_labels: None,
            preprocessor: &StripPageLabel,
            formatter: &Underscore,
        }
    }
}

/// List the pages of a manifest.
///
/// Items with several labels, no label, an unusable label or no image UUID
/// are skipped; the unexpected shapes are logged.
pub fn extract_pages(manifest: &Manifest, options: &PageListOptions<'_>) -> Vec<PageData> {
    let doc_id = manifest.id.clone().unwrap_or_default();
    let mut pages = Vec::new();

    for (index, item) in manifest.pages().enumerate() {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed manifest item");
                continue;
            }
        };

        let raw_label = match item.labels() {
            [label] => label,
            [] => continue,
            labels => {
                tracing::warn!(index, ?labels, "more labels than expected");
                continue;
            }
        };

        let Some(label) = options.preprocessor.preprocess(raw_label) else {
            continue;
        };
        if let Some(valid) = options.valid_labels {
            if !valid.contains(&label) {
                continue;
            }
        }

        let Some(page_id) = item.image_uuid() else {
            tracing::warn!(index, "manifest item has no image UUID");
            continue;
        };

        pages.push(PageData::new(
            doc_id.clone(),
            page_id,
            options.formatter.format(&label),
        ));
    }

    pages
}

/// Fetch a document's manifest; `None` when the request fails
pub fn fetch_manifest<T: Transport>(client: &MzkClient<T>, doc_id: &str) -> Option<Manifest> {
    client.get_json(&client.endpoints().iiif_manifest_url(doc_id))
}

/// Fetch and list a document's pages; `None` when the request fails
pub fn fetch_pages<T: Transport>(
    client: &MzkClient<T>,
    doc_id: &str,
    options: &PageListOptions<'_>,
) -> Option<Vec<PageData>> {
    fetch_manifest(client, doc_id).map(|manifest| extract_pages(&manifest, options))
}
