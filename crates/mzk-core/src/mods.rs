//! MODS metadata parsing
//!
//! Kramerius serves bibliographic metadata as MODS XML
//! (<http://www.loc.gov/mods/v3>). The data is hand-catalogued and uneven:
//! names are sometimes split into family/given parts and sometimes stored
//! as one "Family, Given" string, titles may be missing, and so on. This
//! module extracts what is there into a [`ModsRecord`] without guessing.

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use mzk_citations::{Author, Citation};

use crate::error::ParseError;
use crate::http::{MzkClient, Transport};

/// MODS v3 namespace
pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";

/// Fields extracted from one MODS record. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModsRecord {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Vec<Author>,
    pub publisher: Option<String>,
    pub place_issued: Option<String>,
    pub date_issued: Option<String>,
    pub identifiers: BTreeMap<String, String>,
}

impl ModsRecord {
    /// Combine with a page number and the document's public URL
    pub fn into_citation(self, page_number: Option<u32>, document_url: String) -> Citation {
        Citation::builder()
            .authors(self.authors)
            .maybe_title(self.title)
            .maybe_subtitle(self.subtitle)
            .maybe_publisher(self.publisher)
            .maybe_place_issued(self.place_issued)
            .maybe_date_issued(self.date_issued)
            .identifiers(self.identifiers)
            .page_number(page_number)
            .document_url(document_url)
            .build()
    }
}

/// Fetch and parse a document's MODS record.
///
/// `Ok(None)` when the request fails; an unparseable record is an error.
pub fn fetch_mods<T: Transport>(
    client: &MzkClient<T>,
    doc_id: &str,
) -> Result<Option<ModsRecord>, ParseError> {
    match client.get_text(&client.endpoints().metadata_url(doc_id)) {
        Some(xml) => parse_mods(&xml).map(Some),
        None => Ok(None),
    }
}

/// Parse a MODS document (a `modsCollection` or a bare `mods` root).
///
/// Malformed XML and documents without a `mods` element are errors; missing
/// optional fields are not.
pub fn parse_mods(xml: &str) -> Result<ModsRecord, ParseError> {
    let root = read_tree(xml)?;
    let mods = if root.is_mods("mods") {
        &root
    } else {
        root.child("mods").ok_or(ParseError::MissingElement("mods"))?
    };

    let identifiers = root
        .descendants("identifier")
        .into_iter()
        .filter_map(|node| {
            let kind = node.attr("type").unwrap_or_default().to_string();
            node.text.clone().map(|value| (kind, value))
        })
        .collect();

    let title_info = mods.child("titleInfo");

    Ok(ModsRecord {
        title: title_info.and_then(|t| t.child_text("title")),
        subtitle: title_info.and_then(|t| t.child_text("subTitle")),
        authors: parse_authors(mods),
        publisher: root.first_descendant_text("publisher", |_| true),
        place_issued: root.first_descendant_text("placeTerm", |n| n.attr("type") == Some("text")),
        date_issued: root.first_descendant_text("dateIssued", |_| true),
        identifiers,
    })
}

/// Authors in `usage="primary"` order first, then the rest
fn parse_authors(mods: &Node) -> Vec<Author> {
    let mut primary = Vec::new();
    let mut other = Vec::new();

    for name in mods
        .children
        .iter()
        .filter(|n| n.is_mods("name") && n.attr("type") == Some("personal"))
    {
        let author = parse_name(name);
        if name.attr("usage") == Some("primary") {
            primary.push(author);
        } else {
            other.push(author);
        }
    }

    primary.extend(other);
    primary
}

fn parse_name(name: &Node) -> Author {
    let name_part = |kind: &str| {
        name.first_descendant("namePart", |n| n.attr("type") == Some(kind))
            .and_then(|n| n.text.clone())
    };

    let family = name_part("family");
    let given = name_part("given");
    if family.is_some() || given.is_some() {
        return Author::new(given, family);
    }

    // The whole name may sit in one untyped namePart, often as "Family, Given"
    match name
        .first_descendant("namePart", |_| true)
        .and_then(|n| n.text.as_deref())
    {
        Some(text) => match text.split_once(", ") {
            Some((family, given)) => Author::full(given, family),
            None => Author::given_only(text),
        },
        None => Author::default(),
    }
}

// ===== Minimal element tree =====

#[derive(Debug, Default)]
struct Node {
    local_name: String,
    in_mods_ns: bool,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    fn is_mods(&self, local_name: &str) -> bool {
        self.in_mods_ns && self.local_name == local_name
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, local_name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.is_mods(local_name))
    }

    fn child_text(&self, local_name: &str) -> Option<String> {
        self.child(local_name).and_then(|c| c.text.clone())
    }

    /// First matching element below this one, in document order
    fn first_descendant(&self, local_name: &str, pred: impl Fn(&Node) -> bool + Copy) -> Option<&Node> {
        for child in &self.children {
            if child.is_mods(local_name) && pred(child) {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(local_name, pred) {
                return Some(found);
            }
        }
        None
    }

    fn first_descendant_text(&self, local_name: &str, pred: impl Fn(&Node) -> bool + Copy) -> Option<String> {
        self.first_descendant(local_name, pred)
            .and_then(|n| n.text.clone())
    }

    /// All matching elements below this one, in document order
    fn descendants(&self, local_name: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_descendants(local_name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, local_name: &str, found: &mut Vec<&'a Node>) {
        for child in &self.children {
            if child.is_mods(local_name) {
                found.push(child);
            }
            child.collect_descendants(local_name, found);
        }
    }
}

fn read_tree(xml: &str) -> Result<Node, ParseError> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_mods_ns = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == MODS_NS.as_bytes());

        match event {
            Event::Start(ref e) => {
                stack.push(start_node(e, in_mods_ns)?);
            }
            Event::Empty(ref e) => {
                let node = start_node(e, in_mods_ns)?;
                attach(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::Xml("unbalanced end tag".to_string()))?;
                attach(node, &mut stack, &mut root);
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                push_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, text.trim());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::Xml("unexpected end of document".to_string()));
    }
    root.ok_or(ParseError::MissingElement("root element"))
}

fn start_node(e: &BytesStart<'_>, in_mods_ns: bool) -> Result<Node, ParseError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(Node {
        local_name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
        in_mods_ns,
        attributes,
        text: None,
        children: Vec::new(),
    })
}

fn attach(node: Node, stack: &mut [Node], root: &mut Option<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn push_text(stack: &mut [Node], text: &str) {
    if text.is_empty() {
        return;
    }
    // Only leading text counts; text after a child element is ignored
    if let Some(node) = stack.last_mut() {
        if node.children.is_empty() {
            node.text.get_or_insert_with(String::new).push_str(text);
        }
    }
}
