//! Arena-backed XML document tree for docplate.
//!
//! This crate wraps [`quick-xml`] to turn an XML part (typically a
//! WordprocessingML `document.xml`) into an [`XmlDocument`]: a flat arena of
//! [`XmlNode`]s addressed by [`NodeId`]. Nodes keep parent and child links as
//! indices, so ancestor search and "mark deleted" never fight the borrow
//! checker and never leave dangling references behind.
//!
//! # Overview
//!
//! The main types are:
//! - [`XmlDocument`]: the arena plus the XML declaration and tag vocabulary
//! - [`XmlNode`]: an element with its attributes and children, or a text run
//!   kept in order among its element siblings
//! - [`StructureTags`]: which tags count as runs, cells, rows, lists, tables
//!   and sections
//!
//! # Example
//!
//! ```rust
//! use docplate_xml::parse;
//!
//! let doc = parse(r#"<w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>"#).unwrap();
//!
//! let text = doc.text_nodes()[0];
//! assert_eq!(doc.node(text).content, "Hello");
//!
//! let paragraph = doc.closest_ancestor(text, &["w:p"]).unwrap();
//! assert_eq!(doc.node(paragraph).qualified_name(), "w:p");
//! ```
//!
//! # Deletion
//!
//! [`XmlDocument::delete`] only marks a node. Marked nodes and everything
//! below them are skipped by [`XmlDocument::to_xml_string`] and by
//! [`XmlDocument::text_nodes`].

pub mod error;
pub mod parser;
pub mod tags;
pub mod types;
pub mod writer;

// Re-export main types
pub use error::{Error, Result};
pub use parser::parse;
pub use tags::StructureTags;
pub use types::{NodeId, NodeKind, XmlAttribute, XmlDocument, XmlNode};
