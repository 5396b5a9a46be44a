/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template parameter tree with scoped structural triggers.
//!
//! This crate binds a hierarchy of named values to `{{...}}` placeholders
//! found in a document and lets a placeholder remove or clear the structure
//! around it at render time. It supports:
//!
//! - Nested keys: `{{Company.Name}}`
//! - Slices with positional instances: `{{Users.1.Name}}`, compacted to
//!   `{{Users.Name}}` for the reusable template form
//! - Key placeholders: `{{#Users}}`
//! - Triggers: `{{Item.Price :empty:remove:row}}`, where the tokens pick a
//!   firing condition (`always`, `empty`), a command (`remove`, `clear`) and a
//!   scope (`cell`, `row`, `list`, `table`, `section`)
//!
//! # Architecture
//!
//! [`ParamTree`] owns every [`Param`] in an arena; parent links are
//! [`ParamId`]s derived by [`ParamTree::walk`]. Triggers operate on any
//! document implementing [`DocumentTree`]; the crate provides the
//! implementation for [`docplate_xml::XmlDocument`].
//!
//! # Example
//!
//! ```
//! use docplate_params::{Param, ParamTree};
//!
//! let data = serde_json::json!({ "Users": [{ "Name": "Ann" }] });
//! let tree = ParamTree::from_json(&data)?;
//!
//! let id = tree.find("Users.0.Name").unwrap();
//! let name = tree.get(id);
//! assert_eq!(name.value, "Ann");
//! assert_eq!(name.compact_key, "Users.Name");
//!
//! let raw = Param::from_raw("{{Users.0.Name :empty:remove:row}}").unwrap();
//! assert_eq!(raw.key, "Users.0.Name");
//! # Ok::<(), docplate_params::ParamError>(())
//! ```

pub mod document;
pub mod engine;
pub mod error;
pub mod param;
pub mod pattern;
pub mod tree;
pub mod trigger;

// Re-export main types at crate root
pub use document::DocumentTree;
pub use error::{ParamError, ParamResult};
pub use param::Param;
pub use pattern::{PLACEHOLDER_PATTERN, PlaceholderMatch, find_placeholders};
pub use tree::{ParamId, ParamTree};
pub use trigger::{Command, On, Scope, Trigger};
