//! mzk-citations: citation model and formatting for MZK library records
//!
//! This crate is pure data and text processing:
//! - [`Citation`] / [`Author`] value types
//! - ISO 690 rendering ([`format_iso690`])
//! - BibTeX rendering with collision-free tags ([`bibtex`])
//! - merging page citations of one document ([`group_by_document`])
//!
//! Fetching metadata from the library lives in `mzk-core`.

pub mod bibtex;
pub mod citation;
pub mod grouping;
pub mod iso690;
pub mod text;

pub use bibtex::{
    bibtex_citations, format_bibtex, BibTeXEntry, BibTeXEntryType, BibTeXOptions,
    DefaultTagGenerator, TagAllocator, TagGenerator,
};
pub use citation::{Author, Citation, CitationBuilder};
pub use grouping::group_by_document;
pub use iso690::format_iso690;
