//! Core types for the arena-backed document tree.

use crate::StructureTags;

/// Stable handle to a node inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A parsed XML document.
///
/// All elements live in one `Vec`; links between them are [`NodeId`]s.
/// Deleting a node only marks it, so handles collected before a mutation
/// stay valid for the whole render pass.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,

    root: NodeId,

    /// Raw XML declaration content (`xml version="1.0" ...`), if present.
    pub declaration: Option<String>,

    tags: StructureTags,
}

/// What an arena slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    /// A run of character data between sibling elements.
    Text,
}

/// An element or text run stored in the arena.
///
/// Text is kept as its own child node so mixed content such as
/// `<p>a<b/>c</p>` keeps its order.
#[derive(Debug, Clone)]
pub struct XmlNode {
    pub kind: NodeKind,

    /// The local name of the element (without namespace prefix). Empty for text.
    pub name: String,

    /// Namespace prefix, if any (e.g., "w" in `<w:p>`).
    pub prefix: Option<String>,

    /// Attributes in source order.
    pub attributes: Vec<XmlAttribute>,

    /// Unescaped character data of a text node. Always empty on elements.
    pub content: String,

    parent: Option<NodeId>,

    children: Vec<NodeId>,

    deleted: bool,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any.
    pub prefix: Option<String>,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

impl XmlNode {
    /// Create a detached element from a possibly prefixed name.
    pub fn new(qualified_name: &str) -> Self {
        let (name, prefix) = split_qualified_name(qualified_name);
        Self {
            kind: NodeKind::Element,
            name,
            prefix,
            attributes: Vec::new(),
            content: String::new(),
            parent: None,
            children: Vec::new(),
            deleted: false,
        }
    }

    /// Create a detached text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            name: String::new(),
            prefix: None,
            attributes: Vec::new(),
            content: content.into(),
            parent: None,
            children: Vec::new(),
            deleted: false,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// The name as written in markup, e.g. `w:p`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Get an attribute value by local name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn matches(&self, qualified_name: &str) -> bool {
        if self.is_text() {
            return false;
        }
        match (&self.prefix, qualified_name.split_once(':')) {
            (Some(prefix), Some((p, local))) => prefix == p && self.name == local,
            (None, None) => self.name == qualified_name,
            _ => false,
        }
    }
}

impl XmlAttribute {
    /// Create an attribute from a possibly prefixed name.
    pub fn new(qualified_name: &str, value: impl Into<String>) -> Self {
        let (name, prefix) = split_qualified_name(qualified_name);
        Self {
            name,
            prefix,
            value: value.into(),
        }
    }

    /// The name as written in markup, e.g. `w:val`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }
}

pub(crate) fn split_qualified_name(full_name: &str) -> (String, Option<String>) {
    match full_name.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (full_name.to_string(), None),
    }
}

impl XmlDocument {
    /// Create a document holding only `root`.
    pub fn new(root: XmlNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
            declaration: None,
            tags: StructureTags::default(),
        }
    }

    /// Replace the tag vocabulary used to classify structure.
    pub fn with_structure_tags(mut self, tags: StructureTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn structure_tags(&self) -> &StructureTags {
        &self.tags
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut XmlNode {
        &mut self.nodes[id.0]
    }

    /// Append `node` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, mut node: XmlNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append character data to `parent`, extending its last child when
    /// that is already a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(&last) = self.nodes[parent.0].children.last() {
            if self.nodes[last.0].is_text() {
                self.nodes[last.0].content.push_str(text);
                return last;
            }
        }
        self.append_child(parent, XmlNode::text(text))
    }

    /// Drop whitespace-only text children of an element that also has
    /// element children. Such text is layout between tags, not content.
    pub(crate) fn drop_layout_text(&mut self, id: NodeId) {
        let children = &self.nodes[id.0].children;
        if children.iter().all(|c| self.nodes[c.0].is_text()) {
            return;
        }
        let kept: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|c| {
                let node = &self.nodes[c.0];
                !(node.is_text() && node.content.trim().is_empty())
            })
            .collect();
        self.nodes[id.0].children = kept;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Child elements of `id` with the given qualified name.
    pub fn get_children(&self, id: NodeId, qualified_name: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.nodes[c.0].matches(qualified_name))
            .collect()
    }

    /// Nearest strict ancestor of `id` whose qualified name is in `tags`.
    pub fn closest_ancestor<S: AsRef<str>>(&self, id: NodeId, tags: &[S]) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(candidate) = current {
            let node = &self.nodes[candidate.0];
            if tags.iter().any(|t| node.matches(t.as_ref())) {
                return Some(candidate);
            }
            current = node.parent;
        }
        None
    }

    /// Numbering id of a list item paragraph.
    ///
    /// A WordprocessingML paragraph is a list item when it carries
    /// `w:pPr/w:numPr/w:numId`; paragraphs sharing the `w:val` of that
    /// element belong to the same logical list.
    pub fn list_id(&self, id: NodeId) -> Option<&str> {
        let node = &self.nodes[id.0];
        if !node.matches("w:p") {
            return None;
        }
        let ppr = *self.get_children(id, "w:pPr").first()?;
        let numpr = *self.get_children(ppr, "w:numPr").first()?;
        let num_id = *self.get_children(numpr, "w:numId").first()?;
        self.nodes[num_id.0].get_attribute("val")
    }

    /// Mark `id` deleted. Its subtree is no longer rendered.
    pub fn delete(&mut self, id: NodeId) {
        self.nodes[id.0].deleted = true;
    }

    pub fn is_deleted(&self, id: NodeId) -> bool {
        self.nodes[id.0].deleted
    }

    /// True when `id` or any of its ancestors is marked deleted.
    pub fn is_removed(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.nodes[node.0].deleted {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    /// Detach every child of `id`.
    ///
    /// The children keep their parent link so positions collected earlier can
    /// still find their ancestors.
    pub fn clear_children(&mut self, id: NodeId) {
        self.nodes[id.0].children.clear();
    }

    /// Replace the character data of a text node.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) {
        self.nodes[id.0].content = content.into();
    }

    /// All nodes below `id` in document (pre-)order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Live, non-empty text nodes in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(next) = stack.pop() {
            let node = &self.nodes[next.0];
            if node.deleted {
                continue;
            }
            if node.is_text() && !node.content.is_empty() {
                out.push(next);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Concatenated text of `id` and its live descendants.
    pub fn all_contents(&self, id: NodeId) -> String {
        let mut out = self.nodes[id.0].content.clone();
        for child in self.children(id) {
            if !self.nodes[child.0].deleted {
                out.push_str(&self.all_contents(*child));
            }
        }
        out
    }
}
