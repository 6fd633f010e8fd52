//! Merging page-level citations of the same document

use std::collections::HashMap;

use crate::citation::Citation;

/// Merge citations that share a `document_url`.
///
/// Groups keep the order in which their first member appears. A merged
/// citation takes every field from the group's first citation and the union
/// of all page numbers. Citations without a URL are passed through unmerged.
pub fn group_by_document(citations: &[Citation]) -> Vec<Citation> {
    let mut merged: Vec<Citation> = Vec::with_capacity(citations.len());
    let mut index_by_url: HashMap<&str, usize> = HashMap::new();

    for citation in citations {
        let Some(url) = citation.document_url() else {
            merged.push(citation.clone());
            continue;
        };

        match index_by_url.get(url) {
            Some(&index) => {
                let pages = citation.page_numbers().iter().copied();
                merged[index] = merged[index].to_builder().page_numbers(pages).build();
            }
            None => {
                index_by_url.insert(url, merged.len());
                merged.push(citation.clone());
            }
        }
    }

    merged
}
