/*
 * param.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A single parameter node and its placeholder forms.

use crate::pattern::find_placeholders;
use crate::tree::ParamId;
use crate::trigger::Trigger;
use std::fmt;

/// One bound value, or one collection of bound values.
///
/// Keys are only trustworthy after [`crate::ParamTree::walk`] has run over
/// the tree that owns this parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Param {
    /// Local name segment: a field name or a slice index.
    pub key: String,

    /// Textual form of the bound value. Empty for containers.
    pub value: String,

    /// True when the children are positional slice instances.
    pub is_slice: bool,

    /// Path including slice indices, e.g. `Users.1.Name`.
    pub absolute_key: String,

    /// Path without slice indices, e.g. `Users.Name`.
    pub compact_key: String,

    pub trigger: Option<Trigger>,

    pub(crate) parent: Option<ParamId>,

    pub(crate) children: Vec<ParamId>,
}

impl Param {
    /// Create a leaf whose key is the textual form of `key`.
    pub fn new(key: impl fmt::Display) -> Self {
        let key = key.to_string();
        Self {
            absolute_key: key.clone(),
            compact_key: key.clone(),
            key,
            ..Self::default()
        }
    }

    /// Build a parameter from the first placeholder in `raw`.
    ///
    /// The key group becomes the key; the trigger suffix, if any, is parsed
    /// and attached. Returns `None` if `raw` holds no placeholder.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let found = find_placeholders(raw).next()?;
        let mut param = Param::new(found.key);
        param.trigger = Trigger::parse(found.trigger);
        Some(param)
    }

    /// Bind any value through its textual form.
    pub fn set_value(&mut self, value: impl fmt::Display) {
        self.value = value.to_string();
    }

    pub fn parent(&self) -> Option<ParamId> {
        self.parent
    }

    pub fn children(&self) -> &[ParamId] {
        &self.children
    }

    /// `{{Key}}`
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.absolute_key)
    }

    /// `{{#Key}}`
    pub fn placeholder_key(&self) -> String {
        format!("{{{{#{}}}}}", self.absolute_key)
    }

    /// `{{Key ` with a trailing space; the start of a placeholder carrying a trigger.
    pub fn placeholder_inline(&self) -> String {
        format!("{{{{{} ", self.absolute_key)
    }

    /// `{{#Key `
    pub fn placeholder_key_inline(&self) -> String {
        format!("{{{{#{} ", self.absolute_key)
    }

    /// `{{Key.`, the start of any child placeholder.
    pub fn placeholder_prefix(&self) -> String {
        format!("{{{{{}.", self.absolute_key)
    }

    /// `{{#Key.`
    pub fn placeholder_key_prefix(&self) -> String {
        format!("{{{{#{}.", self.absolute_key)
    }

    /// `{{Key :empty:remove:list}}`
    pub fn placeholder_with_trigger(&self) -> String {
        format!("{{{{{} {}}}}}", self.absolute_key, self.trigger_text())
    }

    /// `{{#Key :empty:remove:list}}`
    pub fn placeholder_key_with_trigger(&self) -> String {
        format!("{{{{#{} {}}}}}", self.absolute_key, self.trigger_text())
    }

    /// Rewrite the first absolute key in `placeholder` to the compact key.
    ///
    /// `{{Users.0.Name}}` becomes `{{Users.Name}}`.
    pub fn to_compact(&self, placeholder: &str) -> String {
        placeholder.replacen(&self.absolute_key, &self.compact_key, 1)
    }

    /// Number of path segments: `Users.1.Name` is 3.
    pub fn depth(&self) -> usize {
        self.absolute_key.matches('.').count() + 1
    }

    /// Look for this parameter's trigger suffix in raw markup.
    ///
    /// The key variant is searched before the plain one. The text between
    /// the inline prefix and the next `}}` is parsed and stored on `self`.
    pub fn extract_trigger_from(&mut self, text: &str) -> Option<Trigger> {
        for prefix in [self.placeholder_key_inline(), self.placeholder_inline()] {
            let Some((_, rest)) = text.split_once(prefix.as_str()) else {
                continue;
            };
            let raw = rest.split_once("}}").map_or(rest, |(raw, _)| raw);
            self.trigger = Trigger::parse(raw);
            return self.trigger;
        }
        None
    }

    fn trigger_text(&self) -> String {
        self.trigger.map(|t| t.to_string()).unwrap_or_default()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>34}={:<20}\tTrigger[{}]",
            self.absolute_key,
            self.value,
            self.trigger_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::{Command, On, Scope};

    fn keyed(absolute_key: &str, compact_key: &str) -> Param {
        let mut p = Param::new("Name");
        p.absolute_key = absolute_key.to_string();
        p.compact_key = compact_key.to_string();
        p
    }

    #[test]
    fn test_new_from_number() {
        let p = Param::new(3);
        assert_eq!(p.key, "3");
        assert_eq!(p.absolute_key, "3");
        assert_eq!(p.compact_key, "3");
        assert_eq!(p.trigger, None);
    }

    #[test]
    fn test_placeholder_forms() {
        let mut p = keyed("Users.1.Name", "Users.Name");
        p.trigger = Trigger::parse(":empty:remove:list");

        assert_eq!(p.placeholder(), "{{Users.1.Name}}");
        assert_eq!(p.placeholder_key(), "{{#Users.1.Name}}");
        assert_eq!(p.placeholder_inline(), "{{Users.1.Name ");
        assert_eq!(p.placeholder_key_inline(), "{{#Users.1.Name ");
        assert_eq!(p.placeholder_prefix(), "{{Users.1.Name.");
        assert_eq!(p.placeholder_key_prefix(), "{{#Users.1.Name.");
        assert_eq!(
            p.placeholder_with_trigger(),
            "{{Users.1.Name :empty:remove:list}}"
        );
        assert_eq!(
            p.placeholder_key_with_trigger(),
            "{{#Users.1.Name :empty:remove:list}}"
        );
    }

    #[test]
    fn test_from_raw() {
        let p = Param::from_raw("Total: {{Item.Price :empty:remove:row}}").unwrap();
        assert_eq!(p.key, "Item.Price");
        assert_eq!(p.absolute_key, "Item.Price");

        let t = p.trigger.unwrap();
        assert_eq!(t.on, On::Empty);
        assert_eq!(t.command, Command::Remove);
        assert_eq!(t.scope, Scope::Row);

        assert_eq!(Param::from_raw("{{Plain}}").unwrap().trigger, None);
        assert!(Param::from_raw("no placeholder here").is_none());
    }

    #[test]
    fn test_placeholder_round_trip() {
        for p in [
            Param::new("Name"),
            keyed("Users.0.Name", "Users.Name"),
            keyed("A_b.9", "A_b"),
        ] {
            let back = Param::from_raw(&p.placeholder()).unwrap();
            assert_eq!(back.key, p.absolute_key);

            let back = Param::from_raw(&p.placeholder_key()).unwrap();
            assert_eq!(back.key, p.absolute_key);
        }
    }

    #[test]
    fn test_to_compact() {
        let p = keyed("Users.0.Name", "Users.Name");
        assert_eq!(p.to_compact("{{Users.0.Name}}"), "{{Users.Name}}");
        assert_eq!(
            p.to_compact("{{Users.0.Name}} {{Users.0.Name}}"),
            "{{Users.Name}} {{Users.0.Name}}"
        );
        // Already compact text is left alone
        assert_eq!(p.to_compact("{{Users.Name}}"), "{{Users.Name}}");
    }

    #[test]
    fn test_depth() {
        assert_eq!(keyed("Users.0.Name", "Users.Name").depth(), 3);
        assert_eq!(Param::new("Users").depth(), 1);
    }

    #[test]
    fn test_set_value_textual_forms() {
        let mut p = Param::new("x");
        p.set_value("text");
        assert_eq!(p.value, "text");
        p.set_value(42);
        assert_eq!(p.value, "42");
        p.set_value(1.5);
        assert_eq!(p.value, "1.5");
        p.set_value(true);
        assert_eq!(p.value, "true");
    }

    #[test]
    fn test_extract_trigger_prefers_key_variant() {
        let mut p = keyed("Users", "Users");
        let raw = "<w:t>{{Users :remove:row}}</w:t><w:t>{{#Users :empty:clear:table}}</w:t>";
        let t = p.extract_trigger_from(raw).unwrap();
        assert_eq!(t.command, Command::Clear);
        assert_eq!(t.scope, Scope::Table);
        assert_eq!(p.trigger, Some(t));
    }

    #[test]
    fn test_extract_trigger_plain_and_missing() {
        let mut p = keyed("Users", "Users");
        let t = p.extract_trigger_from("x {{Users :remove:row}} y").unwrap();
        assert_eq!(t.scope, Scope::Row);

        let mut q = keyed("Other", "Other");
        assert_eq!(q.extract_trigger_from("x {{Users :remove:row}} y"), None);
        assert_eq!(q.trigger, None);
    }

    #[test]
    fn test_display() {
        let mut p = keyed("Users.0.Name", "Users.Name");
        p.set_value("Ann");
        p.trigger = Trigger::parse(":clear:cell");
        let s = p.to_string();
        assert!(s.starts_with(&format!("{:>34}", "Users.0.Name")));
        assert!(s.contains("=Ann "));
        assert!(s.ends_with("\tTrigger[:clear:cell]"));
    }
}
