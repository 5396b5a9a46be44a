//! XML parser that builds [`XmlDocument`] arenas.

use crate::types::split_qualified_name;
use crate::{Error, NodeId, Result, XmlAttribute, XmlDocument, XmlNode};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse XML from a string, producing an arena-backed document.
///
/// # Example
///
/// ```rust
/// use docplate_xml::parse;
///
/// let doc = parse("<w:body><w:p/></w:body>").unwrap();
/// assert_eq!(doc.node(doc.root()).qualified_name(), "w:body");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed, empty, or has several roots.
pub fn parse(content: &str) -> Result<XmlDocument> {
    let mut parser = XmlParser::new(content);
    parser.parse()
}

/// Internal parser state.
struct XmlParser<'a> {
    /// The quick-xml reader.
    reader: Reader<&'a [u8]>,

    /// Document under construction; created at the first element.
    doc: Option<XmlDocument>,

    /// Raw declaration seen before the root element.
    declaration: Option<String>,

    /// Open elements, innermost last.
    stack: Vec<NodeId>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            doc: None,
            declaration: None,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = self.open_element(&e)?;
                    self.stack.push(id);
                }
                Ok(Event::End(e)) => {
                    let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    self.close_element(&end_name)?;
                }
                Ok(Event::Empty(e)) => {
                    self.open_element(&e)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|err| Error::XmlSyntax {
                        message: format!("Invalid text content: {}", err),
                        position: Some(self.reader.buffer_position()),
                    })?;
                    self.push_text(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).to_string();
                    self.push_text(&text);
                }
                Ok(Event::Decl(e)) => {
                    self.declaration = Some(String::from_utf8_lossy(e.as_ref()).to_string());
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {
                    // Skip comments, processing instructions, and DOCTYPE declarations
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        // Anything still open is unterminated
        if let Some(open) = self.stack.last() {
            let name = self.doc_ref()?.node(*open).qualified_name();
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", name),
            });
        }

        let mut doc = self.doc.take().ok_or(Error::EmptyDocument)?;
        doc.declaration = self.declaration.take();
        Ok(doc)
    }

    /// Create the node for a start or empty tag and attach it to the tree.
    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<NodeId> {
        let full_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut node = XmlNode::new(&full_name);
        node.attributes = self.parse_attributes(e)?;

        match (self.stack.last().copied(), self.doc.as_mut()) {
            (Some(parent), Some(doc)) => Ok(doc.append_child(parent, node)),
            (None, None) => {
                let doc = XmlDocument::new(node);
                let root = doc.root();
                self.doc = Some(doc);
                Ok(root)
            }
            (None, Some(_)) => Err(Error::MultipleRoots { name: full_name }),
            (Some(_), None) => Err(Error::InvalidStructure {
                message: format!("Element <{}> has no document", full_name),
            }),
        }
    }

    fn close_element(&mut self, end_name: &str) -> Result<()> {
        let id = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
        })?;

        let doc = self.doc.as_mut().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
        })?;

        // quick-xml checks end names too; this covers a disabled check
        let expected = doc.node(id).qualified_name();
        if expected != end_name {
            return Err(Error::MismatchedEndTag {
                expected,
                found: end_name.to_string(),
            });
        }

        // Whitespace between child elements is layout, not content
        doc.drop_layout_text(id);

        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let (Some(open), Some(doc)) = (self.stack.last(), self.doc.as_mut()) {
            doc.append_text(*open, text);
        }
    }

    fn parse_attributes(&self, e: &BytesStart<'_>) -> Result<Vec<XmlAttribute>> {
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result?;

            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let (name, prefix) = split_qualified_name(&key);

            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(self.reader.buffer_position()),
            })?;

            attributes.push(XmlAttribute {
                name,
                prefix,
                value: value.into_owned(),
            });
        }

        Ok(attributes)
    }

    fn doc_ref(&self) -> Result<&XmlDocument> {
        self.doc.as_ref().ok_or(Error::EmptyDocument)
    }
}
