/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Trigger execution.
//!
//! A trigger is best-effort: a missing or already removed target is a
//! silent no-op, never an error.

use crate::document::DocumentTree;
use crate::param::Param;
use crate::trigger::{Command, On, Scope, Trigger};
use docplate_xml::StructureTags;

impl Scope {
    /// Tags whose closest instance bounds this scope.
    pub fn tags<'a>(&self, tags: &'a StructureTags) -> &'a [String] {
        match self {
            Scope::Single => &tags.single,
            Scope::Cell => &tags.cell,
            Scope::Row => &tags.row,
            Scope::List => &tags.list,
            Scope::Table => &tags.table,
            Scope::Section => &tags.section,
        }
    }
}

impl Param {
    /// Run this parameter's trigger against the node holding its placeholder.
    ///
    /// Returns true when the document was changed. Triggers of one render
    /// pass must run in document order: list and row removal change sibling
    /// sets that later triggers may target.
    pub fn run_trigger<D: DocumentTree>(&self, doc: &mut D, position: D::Node) -> bool {
        let Some(trigger) = self.trigger else {
            return false;
        };

        if trigger.on == On::Empty && !self.value.is_empty() {
            tracing::trace!(key = %self.absolute_key, %trigger, "value present, trigger skipped");
            return false;
        }

        let types = trigger.scope.tags(doc.structure_tags()).to_vec();
        let Some(target) = doc.closest_ancestor_of_types(position, &types) else {
            tracing::debug!(key = %self.absolute_key, %trigger, "no target for trigger");
            return false;
        };
        if doc.is_deleted(target) {
            tracing::debug!(key = %self.absolute_key, %trigger, "trigger target already removed");
            return false;
        }

        // A logical list is a run of sibling items sharing one identifier
        if let Some(list_id) = doc.list_item(target) {
            if matches!(trigger.scope, Scope::List | Scope::Section) {
                return remove_list(doc, target, &list_id, trigger);
            }
        }

        match trigger.command {
            Command::Remove => {
                tracing::debug!(key = %self.absolute_key, %trigger, ?target, "removing");
                doc.clear_children(target);
                doc.mark_deleted(target);
                true
            }
            Command::Clear => {
                tracing::debug!(key = %self.absolute_key, %trigger, ?target, "clearing");
                doc.clear_content(target);
                for node in doc.descendants(target) {
                    doc.clear_content(node);
                }
                true
            }
            Command::Unknown => {
                tracing::debug!(key = %self.absolute_key, %trigger, "trigger has no command");
                false
            }
        }
    }
}

fn remove_list<D: DocumentTree>(
    doc: &mut D,
    item: D::Node,
    list_id: &str,
    trigger: Trigger,
) -> bool {
    if trigger.command != Command::Remove {
        return false;
    }
    let Some(parent) = doc.parent(item) else {
        return false;
    };

    let mut removed = false;
    for sibling in doc.children(parent) {
        if doc.list_item(sibling).as_deref() != Some(list_id) {
            continue;
        }
        tracing::debug!(%trigger, list_id, item = ?sibling, "removing list item");
        doc.clear_children(sibling);
        doc.mark_deleted(sibling);
        removed = true;
    }
    removed
}
