//! Tag vocabulary used to classify document structure.

use serde::Deserialize;

/// Qualified tag names that make up each structural boundary.
///
/// Defaults describe WordprocessingML. Any field missing from a TOML file
/// keeps its default:
///
/// ```toml
/// cell = ["w:tc"]
/// row = ["w:tr"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureTags {
    /// Run or paragraph granularity, used when no scope is given.
    pub single: Vec<String>,

    /// Table cells.
    pub cell: Vec<String>,

    /// Table rows.
    pub row: Vec<String>,

    /// List items (paragraphs carrying numbering).
    pub list: Vec<String>,

    /// Whole tables.
    pub table: Vec<String>,

    /// Section boundaries.
    pub section: Vec<String>,
}

impl Default for StructureTags {
    fn default() -> Self {
        fn tags(names: &[&str]) -> Vec<String> {
            names.iter().map(|n| n.to_string()).collect()
        }

        Self {
            single: tags(&["w:r", "w:p"]),
            cell: tags(&["w:tc"]),
            row: tags(&["w:tr"]),
            list: tags(&["w:p"]),
            table: tags(&["w:tbl"]),
            section: tags(&["w:tbl", "w:p"]),
        }
    }
}

impl StructureTags {
    /// Read tags from TOML, keeping defaults for absent fields.
    pub fn from_toml_str(source: &str) -> crate::Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
