/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Discovery, substitution and trigger execution.

use std::collections::HashMap;

use anyhow::{Context, Result};
use docplate_params::{PLACEHOLDER_PATTERN, Param, ParamTree, find_placeholders};
use docplate_xml::{NodeId, StructureTags, XmlDocument};
use serde_json::Value;

/// Result of rendering one document part.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered markup.
    pub xml: String,

    /// Placeholders discovered in the part.
    pub placeholders: usize,

    /// Triggers that changed the document.
    pub triggers_run: usize,
}

/// A discovered placeholder and the node whose text holds it.
struct Occurrence {
    param: Param,
    node: NodeId,
}

/// Render `xml` with `data`, classifying structure with `tags`.
pub fn render(xml: &str, data: &Value, tags: StructureTags) -> Result<RenderOutput> {
    let tree = ParamTree::from_json(data).context("Failed to bind parameter data")?;
    let mut doc = docplate_xml::parse(xml)
        .context("Failed to parse document part")?
        .with_structure_tags(tags);

    let values: HashMap<&str, &str> = tree
        .iter()
        .map(|(_, p)| (p.absolute_key.as_str(), p.value.as_str()))
        .collect();

    let occurrences = discover(&doc, &values);
    substitute(&mut doc, &values);
    let triggers_run = run_triggers(&mut doc, &occurrences);

    let xml = doc
        .to_xml_string()
        .context("Failed to serialize rendered part")?;

    Ok(RenderOutput {
        xml,
        placeholders: occurrences.len(),
        triggers_run,
    })
}

/// Collect placeholders in document order with their bound values.
fn discover(doc: &XmlDocument, values: &HashMap<&str, &str>) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    for node in doc.text_nodes() {
        for found in find_placeholders(&doc.node(node).content) {
            let Some(mut param) = Param::from_raw(found.text) else {
                continue;
            };
            match values.get(param.key.as_str()) {
                Some(value) => param.set_value(value),
                None => tracing::debug!(key = %param.key, "unbound placeholder"),
            }
            tracing::trace!(param = %param, ?node, "placeholder");
            occurrences.push(Occurrence { param, node });
        }
    }
    occurrences
}

/// Replace every placeholder with its bound value; unbound ones become empty.
fn substitute(doc: &mut XmlDocument, values: &HashMap<&str, &str>) {
    for node in doc.text_nodes() {
        let content = &doc.node(node).content;
        if !PLACEHOLDER_PATTERN.is_match(content) {
            continue;
        }
        let replaced = PLACEHOLDER_PATTERN
            .replace_all(content, |caps: &regex::Captures<'_>| {
                values.get(&caps[2]).copied().unwrap_or_default().to_string()
            })
            .into_owned();
        doc.set_content(node, replaced);
    }
}

fn run_triggers(doc: &mut XmlDocument, occurrences: &[Occurrence]) -> usize {
    let mut run = 0;
    for occurrence in occurrences {
        if occurrence.param.trigger.is_none() {
            continue;
        }
        if doc.is_removed(occurrence.node) {
            tracing::debug!(key = %occurrence.param.key, "placeholder already removed");
            continue;
        }
        if occurrence.param.run_trigger(doc, occurrence.node) {
            run += 1;
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render_default(xml: &str, data: Value) -> RenderOutput {
        render(xml, &data, StructureTags::default()).unwrap()
    }

    #[test]
    fn test_substitutes_values() {
        let out = render_default(
            "<w:p><w:r><w:t>Dear {{Customer.Name}}, total {{Total}}</w:t></w:r></w:p>",
            json!({ "Customer": { "Name": "Ann" }, "Total": 12.5 }),
        );
        assert_eq!(
            out.xml,
            "<w:p><w:r><w:t>Dear Ann, total 12.5</w:t></w:r></w:p>"
        );
        assert_eq!(out.placeholders, 2);
        assert_eq!(out.triggers_run, 0);
    }

    #[test]
    fn test_slice_instances_by_absolute_key() {
        let out = render_default(
            "<w:p><w:r><w:t>{{Users.0.Name}} and {{Users.1.Name}}</w:t></w:r></w:p>",
            json!({ "Users": [{ "Name": "Ann" }, { "Name": "Bob" }] }),
        );
        assert_eq!(out.xml, "<w:p><w:r><w:t>Ann and Bob</w:t></w:r></w:p>");
    }

    #[test]
    fn test_unbound_placeholder_renders_empty() {
        let out = render_default("<w:t>[{{Missing}}]</w:t>", json!({}));
        assert_eq!(out.xml, "<w:t>[]</w:t>");
    }

    #[test]
    fn test_trigger_suffix_is_dropped_and_run() {
        let out = render_default(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{Discount :empty:remove:row}}</w:t></w:r></w:p></w:tc></w:tr><w:tr><w:tc><w:p><w:r><w:t>{{Total :empty:remove:row}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            json!({ "Discount": "", "Total": "9" }),
        );
        assert_eq!(
            out.xml,
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>9</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"
        );
        assert_eq!(out.triggers_run, 1);
    }

    #[test]
    fn test_positions_inside_removed_structure_are_skipped() {
        let out = render_default(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{A :remove:row}}</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>{{B :clear:cell}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            json!({ "A": "", "B": "b" }),
        );
        assert_eq!(out.xml, "<w:tbl/>");
        assert_eq!(out.placeholders, 2);
        assert_eq!(out.triggers_run, 1);
    }

    #[test]
    fn test_unknown_command_is_not_counted() {
        let out = render_default(
            "<w:p><w:r><w:t>{{A :row}}</w:t></w:r></w:p>",
            json!({ "A": "" }),
        );
        assert_eq!(out.placeholders, 1);
        assert_eq!(out.triggers_run, 0);
    }

    #[test]
    fn test_mixed_content_keeps_text_around_elements() {
        let out = render_default(
            "<td>Total: <b>x</b> {{V}}</td>",
            json!({ "V": "y" }),
        );
        assert_eq!(out.xml, "<td>Total: <b>x</b> y</td>");
    }

    #[test]
    fn test_non_object_data_is_an_error() {
        let err = render("<w:t/>", &json!("x"), StructureTags::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to bind parameter data");
    }
}
