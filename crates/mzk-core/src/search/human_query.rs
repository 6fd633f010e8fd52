//! Links to the public search page
//!
//! The digital library's web interface accepts the same filters as plain,
//! human-readable query parameters. Useful for showing a user what a
//! scripted search corresponds to.

use chrono::Datelike;

/// Parameters of the public search page. Empty strings are sent as empty
/// parameters, the way the page itself does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanQuery {
    pub text_query: String,
    pub access: String,
    pub keywords: String,
    pub authors: String,
    pub languages: String,
    pub licences: String,
    pub locations: String,
    pub publishers: String,
    pub places: String,
    pub genres: String,
    pub doctypes: String,
    pub published_from: Option<i32>,
    pub published_to: Option<i32>,
}

impl HumanQuery {
    pub fn new(text_query: impl Into<String>) -> Self {
        Self {
            text_query: text_query.into(),
            ..Self::default()
        }
    }

    /// Parameters in page order. The year filter only works with both
    /// bounds, so a missing one is filled in.
    fn params(&self) -> [(&'static str, String); 13] {
        let (from, to) = match (self.published_from, self.published_to) {
            (Some(from), None) => (Some(from), Some(chrono::Local::now().year())),
            (None, Some(to)) => (Some(0), Some(to)),
            bounds => bounds,
        };
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_default();

        [
            ("text_query", self.text_query.clone()),
            ("access", self.access.clone()),
            ("keywords", self.keywords.clone()),
            ("authors", self.authors.clone()),
            ("languages", self.languages.clone()),
            ("licences", self.licences.clone()),
            ("locations", self.locations.clone()),
            ("publishers", self.publishers.clone()),
            ("places", self.places.clone()),
            ("genres", self.genres.clone()),
            ("doctypes", self.doctypes.clone()),
            ("published_from", year(from)),
            ("published_to", year(to)),
        ]
    }
}

/// Full search page URL for `query`
pub fn human_readable_url(search_page: &str, query: &HumanQuery) -> String {
    let params: Vec<String> = query
        .params()
        .iter()
        .map(|(key, value)| format!("{}={}", key, form_encode(value)))
        .collect();
    format!("{}?{}", search_page, params.join("&"))
}

fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
