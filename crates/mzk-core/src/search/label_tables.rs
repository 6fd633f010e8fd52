//! Filter label tables
//!
//! Access levels, licences and document types are chosen by short labels
//! (`"public"`, `"dnnto"`, `"monograph"`) and translated into backend query
//! tokens. The built-in tables are compiled in from `tag_data/`; a
//! deployment can point `search.tag_data_dir` at its own copies.

use std::collections::BTreeMap;
use std::path::Path;

use lazy_static::lazy_static;

use crate::error::{ConfigError, QueryError};

const ACCESS_FILE: &str = "access.json";
const LICENCES_FILE: &str = "licences.json";
const DOCTYPES_FILE: &str = "doctypes.json";

lazy_static! {
    static ref BUILTIN: LabelTables = LabelTables::from_json(
        include_str!("../../tag_data/access.json"),
        include_str!("../../tag_data/licences.json"),
        include_str!("../../tag_data/doctypes.json"),
    )
    .expect("built-in tag data is valid JSON");
}

/// Label -> query token lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTables {
    access: BTreeMap<String, String>,
    licences: BTreeMap<String, String>,
    doctypes: BTreeMap<String, String>,
}

impl Default for LabelTables {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl LabelTables {
    /// Tables from three JSON objects mapping label to token
    pub fn from_json(access: &str, licences: &str, doctypes: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            access: serde_json::from_str(access)?,
            licences: serde_json::from_str(licences)?,
            doctypes: serde_json::from_str(doctypes)?,
        })
    }

    /// Read `access.json`, `licences.json` and `doctypes.json` from `dir`
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let read = |name: &str| std::fs::read_to_string(dir.join(name));
        let tables = Self::from_json(&read(ACCESS_FILE)?, &read(LICENCES_FILE)?, &read(DOCTYPES_FILE)?)?;
        tracing::debug!(dir = %dir.display(), "loaded label tables");
        Ok(tables)
    }

    pub fn access(&self, label: &str) -> Result<&str, QueryError> {
        lookup(&self.access, "access", label)
    }

    pub fn licence(&self, label: &str) -> Result<&str, QueryError> {
        lookup(&self.licences, "licence", label)
    }

    pub fn doctype(&self, label: &str) -> Result<&str, QueryError> {
        lookup(&self.doctypes, "doctype", label)
    }
}

fn lookup<'a>(
    table: &'a BTreeMap<String, String>,
    name: &'static str,
    label: &str,
) -> Result<&'a str, QueryError> {
    table
        .get(label)
        .map(String::as_str)
        .ok_or_else(|| QueryError::UnknownLabel {
            table: name,
            key: label.to_string(),
        })
}
