//! Configuration for mzk-core
//!
//! Endpoint templates, HTTP client settings and search behaviour. Every
//! section has defaults pointing at the public MZK Kramerius instance, so a
//! config file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MzkConfig {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
    pub search: SearchConfig,
}

/// Backend URLs. Templates use `{doc_id}`, `{page_id}` and `{uuid}`
/// placeholders; ids are given without the `uuid:` prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// MODS metadata of a document
    pub metadata_url: String,
    /// IIIF presentation manifest of a document
    pub iiif_manifest_url: String,
    /// Solr-backed search API (without query string)
    pub search_url: String,
    /// Public viewer page of a document, used as the citation URL
    pub view_document_url: String,
    /// Public viewer page of a single page
    pub view_page_url: String,
    /// External service rendering ISO 690 citations as HTML
    pub citation_service_url: String,
    /// Public search page taking human-readable parameters
    pub human_search_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            metadata_url:
                "https://api.kramerius.mzk.cz/search/api/client/v7.0/items/uuid:{doc_id}/metadata/mods"
                    .to_string(),
            iiif_manifest_url: "https://iiif.digitalniknihovna.cz/mzk/uuid:{doc_id}".to_string(),
            search_url: "https://api.kramerius.mzk.cz/search/api/client/v7.0/search".to_string(),
            view_document_url: "https://www.digitalniknihovna.cz/mzk/uuid/uuid:{doc_id}".to_string(),
            view_page_url:
                "https://www.digitalniknihovna.cz/mzk/uuid/uuid:{doc_id}?page=uuid:{page_id}"
                    .to_string(),
            citation_service_url: "https://citace.kramerius.cloud/v1/kramerius?url=https://api.kramerius.mzk.cz&uuid=uuid:{uuid}&format=html&lang=en&k7=true".to_string(),
            human_search_url: "https://www.digitalniknihovna.cz/mzk/search".to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn metadata_url(&self, doc_id: &str) -> String {
        self.metadata_url.replace("{doc_id}", doc_id)
    }

    pub fn iiif_manifest_url(&self, doc_id: &str) -> String {
        self.iiif_manifest_url.replace("{doc_id}", doc_id)
    }

    pub fn view_document_url(&self, doc_id: &str) -> String {
        self.view_document_url.replace("{doc_id}", doc_id)
    }

    pub fn view_page_url(&self, doc_id: &str, page_id: &str) -> String {
        self.view_page_url
            .replace("{doc_id}", doc_id)
            .replace("{page_id}", page_id)
    }

    pub fn citation_service_url(&self, uuid: &str) -> String {
        self.citation_service_url.replace("{uuid}", uuid)
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("mzk-core/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

/// Search and pagination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Documents requested per search call
    pub batch_size: usize,
    /// Filter AND-ed into every query, restricting hits to top-level documents
    pub base_filter: String,
    /// Directory with `access.json`, `licences.json` and `doctypes.json`
    /// overriding the built-in label tables
    pub tag_data_dir: Option<PathBuf>,
}

/// Top-level document models searched by default
pub const DEFAULT_BASE_FILTER: &str = "(model:monograph OR model:periodical OR (model:collection AND collection.is_standalone:true) OR model:graphic OR model:map OR model:sheetmusic OR model:soundrecording OR model:archive OR model:manuscript OR model:convolute OR model:monographunit)";

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            base_filter: DEFAULT_BASE_FILTER.to_string(),
            tag_data_dir: None,
        }
    }
}

impl MzkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Read a config file; `.json` files are parsed as JSON, anything else as TOML.
    /// The result is validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "search.batch_size must be positive".to_string(),
            ));
        }

        let templates = [
            ("endpoints.metadata_url", &self.endpoints.metadata_url, "{doc_id}"),
            ("endpoints.iiif_manifest_url", &self.endpoints.iiif_manifest_url, "{doc_id}"),
            ("endpoints.view_document_url", &self.endpoints.view_document_url, "{doc_id}"),
            ("endpoints.view_page_url", &self.endpoints.view_page_url, "{page_id}"),
            ("endpoints.citation_service_url", &self.endpoints.citation_service_url, "{uuid}"),
        ];
        for (name, template, placeholder) in templates {
            if !template.contains(placeholder) {
                return Err(ConfigError::Invalid(format!(
                    "{} must contain {}",
                    name, placeholder
                )));
            }
        }

        let fixed = [
            ("endpoints.search_url", &self.endpoints.search_url),
            ("endpoints.human_search_url", &self.endpoints.human_search_url),
        ];
        for (name, value) in fixed {
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::Invalid(format!("{} is not a valid URL: {}", name, e)));
            }
        }

        Ok(())
    }
}
