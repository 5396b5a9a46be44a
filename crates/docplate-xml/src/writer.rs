//! Serialization of an [`XmlDocument`] back to markup.

use crate::{Error, NodeId, Result, XmlDocument};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

impl XmlDocument {
    /// Serialize the live part of the tree.
    ///
    /// Deleted nodes are skipped together with their subtrees. Text runs are
    /// written in place among their sibling elements.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());

        if !self.is_deleted(self.root()) {
            self.write_node(&mut writer, self.root())?;
        }

        let body = String::from_utf8(writer.into_inner()).map_err(|err| Error::Write {
            message: err.to_string(),
        })?;

        Ok(match &self.declaration {
            Some(declaration) => format!("<?{}?>\n{}", declaration, body),
            None => body,
        })
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        let node = self.node(id);
        if node.is_text() {
            return emit(writer, Event::Text(BytesText::new(&node.content)));
        }

        let name = node.qualified_name();

        let mut start = BytesStart::new(name.as_str());
        for attr in &node.attributes {
            let key = attr.qualified_name();
            start.push_attribute((key.as_str(), attr.value.as_str()));
        }

        let live_children: Vec<NodeId> = node
            .children()
            .iter()
            .copied()
            .filter(|c| {
                let child = self.node(*c);
                !child.is_deleted() && !(child.is_text() && child.content.is_empty())
            })
            .collect();

        if live_children.is_empty() {
            return emit(writer, Event::Empty(start));
        }

        emit(writer, Event::Start(start))?;
        for child in live_children {
            self.write_node(writer, child)?;
        }
        emit(writer, Event::End(BytesEnd::new(name.as_str())))
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|err| Error::Write {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_keeps_structure() {
        let source = r#"<w:p w:rsidR="00A1"><w:r><w:t xml:space="preserve">Hi &amp; bye</w:t></w:r><w:r/></w:p>"#;
        let doc = parse(source).unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), source);
    }

    #[test]
    fn test_declaration_is_written() {
        let doc = parse(r#"<?xml version="1.0" encoding="UTF-8"?><root/>"#).unwrap();
        assert_eq!(
            doc.to_xml_string().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root/>"
        );
    }

    #[test]
    fn test_deleted_subtree_is_skipped() {
        let mut doc = parse("<w:body><w:p><w:r><w:t>gone</w:t></w:r></w:p><w:p/></w:body>").unwrap();
        let first = doc.children(doc.root())[0];
        doc.delete(first);
        assert_eq!(doc.to_xml_string().unwrap(), "<w:body><w:p/></w:body>");
    }

    #[test]
    fn test_cleared_content_collapses_to_empty_tag() {
        let mut doc = parse("<w:r><w:t>text</w:t></w:r>").unwrap();
        let t = doc.text_nodes()[0];
        doc.set_content(t, "");
        assert_eq!(doc.to_xml_string().unwrap(), "<w:r><w:t/></w:r>");
    }

    #[test]
    fn test_mixed_content_round_trip() {
        for source in [
            "<w:p>a<w:r/>b</w:p>",
            "<td>Total: <b>x</b> due</td>",
            "<p><i>x</i> and <i>y</i></p>",
        ] {
            let doc = parse(source).unwrap();
            assert_eq!(doc.to_xml_string().unwrap(), source);
        }
    }
}
