//! MZK Core - client for the Moravian Library's digital library
//!
//! This crate connects the citation model of `mzk-citations` to the
//! Kramerius backend:
//!
//! - **Config**: endpoint templates, HTTP and search settings (TOML or JSON)
//! - **HTTP**: blocking transport behind the [`Transport`] trait
//! - **MODS**: bibliographic metadata parsing into [`ModsRecord`]
//! - **IIIF**: page manifests, page positions and page listings
//! - **Generator**: [`CitationGenerator`] tying metadata and pages to a [`Citation`]
//! - **Search**: Solr filter/relevance queries and paginated id retrieval
//!
//! # Data flow
//!
//! ```text
//! MODS + manifest -> Citation -> ISO 690 / BibTeX
//! QueryFilters -> SearchQuery -> PaginatedFetcher -> document ids
//! ```
//!
//! Network failures are logged and reported as `None`; malformed documents,
//! bad configuration and unknown filter labels are errors.

pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod iiif;
pub mod mods;
pub mod search;

pub use config::{EndpointConfig, HttpConfig, MzkConfig, SearchConfig};
pub use error::{ConfigError, MzkError, ParseError, QueryError, Result};
pub use generator::CitationGenerator;
pub use http::{HttpClient, HttpError, HttpResponse, MzkClient, Transport};
pub use iiif::{
    extract_pages, fetch_pages, locate_page, LabelFormatter, LabelPreprocessor, Manifest,
    PageData, PageListOptions, StripPageLabel, Underscore,
};
pub use mods::{fetch_mods, parse_mods, ModsRecord};
pub use search::{
    human_readable_url, DocumentLimit, FilterValues, HumanQuery, LabelTables, PaginatedFetcher,
    QueryFactory, QueryFilters, SearchQuery,
};

pub use mzk_citations::Citation;
