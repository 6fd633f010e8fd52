//! Citation tag (cite key) generation
//!
//! Base tags come from a [`TagGenerator`]; a [`TagAllocator`] makes them
//! unique within one generation session by appending `:1`, `:2`, ...

use std::collections::HashSet;

use super::stopwords::is_stop_word;
use crate::citation::Citation;
use crate::text::{capitalize, strip_accents, strip_date};

/// Strategy for deriving a base tag from a citation.
///
/// Closures `Fn(&Citation) -> String` implement this trait too.
pub trait TagGenerator {
    fn base_tag(&self, citation: &Citation) -> String;
}

impl<F> TagGenerator for F
where
    F: Fn(&Citation) -> String,
{
    fn base_tag(&self, citation: &Citation) -> String {
        self(citation)
    }
}

/// Number of significant title words used when there is no author name
const TITLE_WORDS: usize = 2;

/// Default tag strategy.
///
/// 1. First author's family name, accents stripped, plus the year.
/// 2. Otherwise the first author's given name plus the year.
/// 3. Otherwise the first two non-stop-words of the title, each
///    capitalized, plus the year.
///
/// The year is `date_issued` with `[`, `]` and `?` removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTagGenerator;

impl TagGenerator for DefaultTagGenerator {
    fn base_tag(&self, citation: &Citation) -> String {
        let first = citation.authors().first();
        let stem = match first.and_then(|a| a.family.as_deref().or(a.given.as_deref())) {
            Some(name) => strip_accents(name),
            None => title_stem(citation.title().unwrap_or_default()),
        };

        match citation.date_issued() {
            Some(date) => stem + &strip_date(date),
            None => stem,
        }
    }
}

fn title_stem(title: &str) -> String {
    title
        .split_whitespace()
        .filter(|word| !is_stop_word(word))
        .take(TITLE_WORDS)
        .map(|word| capitalize(&strip_accents(word)))
        .collect()
}

/// Tracks the tags handed out during one citation-generation session.
///
/// Each session owns its allocator; nothing is shared or persisted. Wrap it
/// in a mutex if several threads must draw from the same session.
#[derive(Debug, Clone, Default)]
pub struct TagAllocator {
    used: HashSet<String>,
}

impl TagAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session that must avoid `existing` tags
    pub fn with_used<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            used: existing.into_iter().map(Into::into).collect(),
        }
    }

    /// Return `base` if unused, otherwise the first free `base:N` (N from 1).
    /// The returned tag is recorded as used.
    pub fn allocate(&mut self, base: &str) -> String {
        let mut tag = base.to_string();
        let mut suffix = 1u32;
        while self.used.contains(&tag) {
            tag = format!("{}:{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(tag.clone());
        tag
    }

    pub fn is_used(&self, tag: &str) -> bool {
        self.used.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
