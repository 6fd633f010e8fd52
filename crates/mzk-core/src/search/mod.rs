//! Document search
//!
//! [`QueryFactory`] turns structured filters into the backend's Solr query
//! syntax; [`PaginatedFetcher`] runs a query and collects the matching
//! document ids batch by batch. [`HumanQuery`] builds the equivalent link
//! to the public search page.

mod fetcher;
mod human_query;
mod label_tables;
mod query_factory;

pub use fetcher::{DocumentLimit, PaginatedFetcher};
pub use human_query::{human_readable_url, HumanQuery};
pub use label_tables::LabelTables;
pub use query_factory::{encode_query, FilterValues, QueryFactory, QueryFilters, SearchQuery, MATCH_ALL};
