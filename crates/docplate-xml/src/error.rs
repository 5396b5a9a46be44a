//! Error types for reading, writing and configuring XML documents.

use thiserror::Error;

/// Result type alias for docplate-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or serializing a document.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed markup reported by the reader.
    #[error("XML syntax error: {message}{}", at_position(.position))]
    XmlSyntax {
        message: String,
        /// Byte offset into the input, when known.
        position: Option<u64>,
    },

    /// Input ended inside an open element.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: String,
    },

    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    #[error("Invalid XML structure: {message}")]
    InvalidStructure { message: String },

    /// No root element.
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// A second top-level element.
    #[error("Invalid XML: multiple root elements (second root <{name}>)")]
    MultipleRoots { name: String },

    /// Failure while serializing the tree back to markup.
    #[error("Failed to write XML: {message}")]
    Write { message: String },

    /// Structure tag configuration could not be read.
    #[error("Invalid structure tag configuration: {message}")]
    Config { message: String },
}

fn at_position(position: &Option<u64>) -> String {
    match position {
        Some(pos) => format!(" at byte {}", pos),
        None => String::new(),
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config {
            message: err.to_string(),
        }
    }
}
