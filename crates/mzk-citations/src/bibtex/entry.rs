//! BibTeX entry data structures

/// BibTeX entry type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BibTeXEntryType {
    Article,
    Book,
    Booklet,
    InBook,
    InCollection,
    Manual,
    #[default]
    Misc,
    Online,
    Unpublished,
    /// Any other type name, written verbatim
    Custom(String),
}

impl BibTeXEntryType {
    /// Parse an entry type from a string (case-insensitive, leading `@` allowed)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let name = s.trim().trim_start_matches('@');
        match name.to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "booklet" => Self::Booklet,
            "inbook" => Self::InBook,
            "incollection" => Self::InCollection,
            "manual" => Self::Manual,
            "misc" => Self::Misc,
            "online" | "electronic" | "www" => Self::Online,
            "unpublished" => Self::Unpublished,
            _ => Self::Custom(name.to_string()),
        }
    }

    /// Canonical type name without the `@`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Booklet => "booklet",
            Self::InBook => "inbook",
            Self::InCollection => "incollection",
            Self::Manual => "manual",
            Self::Misc => "misc",
            Self::Online => "online",
            Self::Unpublished => "unpublished",
            Self::Custom(name) => name,
        }
    }
}

/// A single BibTeX field (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXField {
    pub key: String,
    pub value: String,
}

/// A BibTeX record ready for formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXEntry {
    pub cite_key: String,
    pub entry_type: BibTeXEntryType,
    pub fields: Vec<BibTeXField>,
}

impl BibTeXEntry {
    pub fn new(cite_key: String, entry_type: BibTeXEntryType) -> Self {
        Self {
            cite_key,
            entry_type,
            fields: Vec::new(),
        }
    }

    /// Append a field; fields keep insertion order
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibTeXField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(key))
            .map(|f| f.value.as_str())
    }
}
