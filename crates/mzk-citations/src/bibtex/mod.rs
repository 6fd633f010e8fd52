//! BibTeX rendering of citations
//!
//! A citation becomes a [`BibTeXEntry`] with a fixed field list (author,
//! title, subtitle, publisher, year, pages, isbn, url). Fields are always
//! emitted; missing values render as `{}`.

mod entry;
mod formatter;
mod stopwords;
mod tag;

pub use entry::{BibTeXEntry, BibTeXEntryType, BibTeXField};
pub use formatter::{format_entries, format_entry, format_entry_indented, DEFAULT_INDENT};
pub use stopwords::{is_stop_word, ENGLISH_STOP_WORDS};
pub use tag::{DefaultTagGenerator, TagAllocator, TagGenerator};

use crate::citation::Citation;
use crate::text::join_non_empty;

/// Caller-controlled parts of a BibTeX record
#[derive(Debug, Clone)]
pub struct BibTeXOptions {
    pub entry_type: BibTeXEntryType,
    /// Spaces before each field
    pub indent: usize,
    /// Author field used when the citation names nobody ("", "Anon", ...)
    pub default_author: String,
}

impl Default for BibTeXOptions {
    fn default() -> Self {
        Self {
            entry_type: BibTeXEntryType::Misc,
            indent: DEFAULT_INDENT,
            default_author: String::new(),
        }
    }
}

/// Build the entry for `citation` under an already allocated `tag`
pub fn citation_to_entry(citation: &Citation, tag: String, options: &BibTeXOptions) -> BibTeXEntry {
    let pages: Vec<String> = citation
        .page_numbers()
        .iter()
        .map(|page| page.to_string())
        .collect();

    let mut entry = BibTeXEntry::new(tag, options.entry_type.clone());
    entry.add_field("author", author_field(citation, &options.default_author));
    entry.add_field("title", citation.title().unwrap_or_default());
    entry.add_field("subtitle", citation.subtitle().unwrap_or_default());
    entry.add_field("publisher", citation.publisher().unwrap_or_default());
    entry.add_field("year", citation.date_issued().unwrap_or_default());
    entry.add_field("pages", pages.join(", "));
    entry.add_field("isbn", citation.identifier("isbn").unwrap_or_default());
    entry.add_field("url", citation.document_url().unwrap_or_default());
    entry
}

/// Render one citation, drawing its tag from `allocator`
pub fn format_bibtex(
    citation: &Citation,
    options: &BibTeXOptions,
    generator: &dyn TagGenerator,
    allocator: &mut TagAllocator,
) -> String {
    let tag = allocator.allocate(&generator.base_tag(citation));
    let entry = citation_to_entry(citation, tag, options);
    format_entry_indented(&entry, options.indent)
}

/// Render several citations within one tag session, blank-line separated
pub fn bibtex_citations(
    citations: &[Citation],
    options: &BibTeXOptions,
    generator: &dyn TagGenerator,
) -> String {
    let mut allocator = TagAllocator::new();
    citations
        .iter()
        .map(|citation| format_bibtex(citation, options, generator, &mut allocator))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn author_field(citation: &Citation, default_author: &str) -> String {
    let authors = join_non_empty(
        " and ",
        citation
            .authors()
            .iter()
            .map(|author| Some(author.display_name())),
    );
    if authors.is_empty() {
        default_author.to_string()
    } else {
        authors
    }
}
