/*
 * end_to_end.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render the fixture parts and check the resulting document text.
 */

use docplate_render::render;
use docplate_xml::{StructureTags, parse};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::process::Command;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

fn document_text(xml: &str) -> String {
    let doc = parse(xml).unwrap();
    doc.all_contents(doc.root())
}

#[test]
fn test_invoice_fixture() {
    let xml = read_fixture("invoice.xml");
    let data: serde_json::Value = serde_json::from_str(&read_fixture("invoice.json")).unwrap();

    let output = render(&xml, &data, StructureTags::default()).unwrap();

    assert_eq!(output.placeholders, 6);
    assert_eq!(output.triggers_run, 3);
    assert!(output.xml.starts_with("<?xml version=\"1.0\""));
    assert!(!output.xml.contains("{{"));
    assert_eq!(
        document_text(&output.xml),
        "Invoice for Ann LeeNote: ItemPricePen2.5Thank you"
    );
}

#[test]
fn test_invoice_fixture_with_filled_values() {
    let xml = read_fixture("invoice.xml");
    let data = serde_json::json!({
        "Customer": { "Name": "Bo", "Note": "VIP" },
        "Items": [{ "Name": "Ink", "Price": "4" }],
        "Discount": "10%",
        "Terms": "Net 30"
    });

    let output = render(&xml, &data, StructureTags::default()).unwrap();

    assert_eq!(
        document_text(&output.xml),
        "Invoice for BoNote: VIPItemPriceInk4Discount10%TermsNet 30Thank you"
    );
}

#[test]
fn test_custom_structure_tags() {
    let tags = StructureTags::from_toml_str(&read_fixture("custom_tags.toml")).unwrap();
    let output = render(
        "<table><tr><td>{{Gone :remove:row}}</td></tr><tr><td>{{Kept}}</td></tr></table>",
        &serde_json::json!({ "Kept": "y" }),
        tags,
    )
    .unwrap();

    assert_eq!(output.xml, "<table><tr><td>y</td></tr></table>");
}

#[test]
fn test_malformed_part_reports_context() {
    let err = render("<w:p><w:r></w:p>", &serde_json::json!({}), StructureTags::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to parse document part");
}

#[test]
fn test_cli_writes_to_stdout() {
    let output = Command::new(env!("CARGO_BIN_EXE_docplate-render"))
        .arg(fixture_path("invoice.xml"))
        .arg("--data")
        .arg(fixture_path("invoice.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let xml = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        document_text(&xml),
        "Invoice for Ann LeeNote: ItemPricePen2.5Thank you"
    );
}

#[test]
fn test_cli_rejects_invalid_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_docplate-render"))
        .arg(fixture_path("invoice.xml"))
        .arg("--data")
        .arg(fixture_path("custom_tags.toml"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid JSON in data file"));
}
