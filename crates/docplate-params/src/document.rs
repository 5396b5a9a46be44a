/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The document contract triggers run against.
//!
//! Triggers never own the document. They need ancestor search, list-item
//! detection, and mark/clear primitives; this trait is that surface.

use docplate_xml::{NodeId, StructureTags, XmlDocument};
use std::fmt::Debug;

/// Operations a document tree must offer to run triggers.
pub trait DocumentTree {
    /// Stable handle to a node.
    type Node: Copy + Eq + Debug;

    /// Tag vocabulary for each scope.
    fn structure_tags(&self) -> &StructureTags;

    /// Nearest strict ancestor whose tag is one of `types`.
    fn closest_ancestor_of_types(&self, node: Self::Node, types: &[String]) -> Option<Self::Node>;

    /// List identifier when `node` is a list item.
    fn list_item(&self, node: Self::Node) -> Option<String>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// All nodes below `node`, in document order.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node>;

    fn mark_deleted(&mut self, node: Self::Node);

    fn is_deleted(&self, node: Self::Node) -> bool;

    fn clear_children(&mut self, node: Self::Node);

    fn clear_content(&mut self, node: Self::Node);
}

impl DocumentTree for XmlDocument {
    type Node = NodeId;

    fn structure_tags(&self) -> &StructureTags {
        XmlDocument::structure_tags(self)
    }

    fn closest_ancestor_of_types(&self, node: NodeId, types: &[String]) -> Option<NodeId> {
        self.closest_ancestor(node, types)
    }

    fn list_item(&self, node: NodeId) -> Option<String> {
        self.list_id(node).map(str::to_string)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        XmlDocument::parent(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        XmlDocument::children(self, node).to_vec()
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        XmlDocument::descendants(self, node)
    }

    fn mark_deleted(&mut self, node: NodeId) {
        self.delete(node);
    }

    fn is_deleted(&self, node: NodeId) -> bool {
        XmlDocument::is_deleted(self, node)
    }

    fn clear_children(&mut self, node: NodeId) {
        XmlDocument::clear_children(self, node);
    }

    fn clear_content(&mut self, node: NodeId) {
        self.set_content(node, "");
    }
}
