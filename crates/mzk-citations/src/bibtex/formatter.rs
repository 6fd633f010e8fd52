//! BibTeX formatting module
//!
//! Converts BibTeXEntry structures to BibTeX strings.

use super::entry::BibTeXEntry;

/// Indentation used when the caller does not pick one
pub const DEFAULT_INDENT: usize = 4;

/// Format a single BibTeX entry with the default indentation
pub fn format_entry(entry: &BibTeXEntry) -> String {
    format_entry_indented(entry, DEFAULT_INDENT)
}

/// Format a single BibTeX entry, indenting each field by `indent` spaces.
///
/// Every value is brace-delimited, including empty ones. The last field
/// carries no trailing comma.
pub fn format_entry_indented(entry: &BibTeXEntry, indent: usize) -> String {
    let separator = format!(",\n{}", " ".repeat(indent));

    let mut lines = Vec::with_capacity(entry.fields.len() + 1);
    lines.push(format!("@{}{{{}", entry.entry_type.as_str(), entry.cite_key));
    for field in &entry.fields {
        lines.push(format!("{} = {{{}}}", field.key, field.value));
    }

    let mut result = lines.join(&separator);
    result.push_str("\n}");
    result
}

/// Format multiple entries separated by a blank line
pub fn format_entries(entries: &[BibTeXEntry], indent: usize) -> String {
    entries
        .iter()
        .map(|entry| format_entry_indented(entry, indent))
        .collect::<Vec<_>>()
        .join("\n\n")
}
