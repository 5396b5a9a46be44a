/*
 * tree.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parameter tree: arena ownership, key derivation and data binding.

use crate::error::{ParamError, ParamResult};
use crate::param::Param;
use serde::Serialize;
use serde_json::Value;

/// Handle to a [`Param`] inside a [`ParamTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(usize);

/// Owner of every parameter in a render pass.
///
/// Parents own children through [`ParamId`] lists; the parent link on each
/// child is an index with no ownership attached.
#[derive(Debug, Clone, Default)]
pub struct ParamTree {
    params: Vec<Param>,
    roots: Vec<ParamId>,
}

impl ParamTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, param: Param) -> ParamId {
        let id = ParamId(self.params.len());
        self.params.push(param);
        self.roots.push(id);
        id
    }

    /// Attach `param` as the last child of `parent`.
    ///
    /// Keys of the new child are derived on the next walk.
    pub fn add_child(&mut self, parent: ParamId, param: Param) -> ParamId {
        let id = ParamId(self.params.len());
        self.params.push(param);
        self.params[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: ParamId) -> &Param {
        &self.params[id.0]
    }

    pub fn get_mut(&mut self, id: ParamId) -> &mut Param {
        &mut self.params[id.0]
    }

    pub fn parent(&self, id: ParamId) -> Option<ParamId> {
        self.params[id.0].parent
    }

    pub fn children(&self, id: ParamId) -> &[ParamId] {
        &self.params[id.0].children
    }

    pub fn roots(&self) -> &[ParamId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Walk the descendants of `id`, deriving their keys.
    ///
    /// For each child in order: set its parent, derive `absolute_key` and
    /// `compact_key` from the parent, call `visit`, then descend. This is
    /// the only place keys are derived.
    pub fn walk<F>(&mut self, id: ParamId, mut visit: F)
    where
        F: FnMut(ParamId, &Param),
    {
        self.walk_children(id, &mut visit);
    }

    /// Reset every root's keys and walk all of them.
    pub fn walk_all<F>(&mut self, mut visit: F)
    where
        F: FnMut(ParamId, &Param),
    {
        for root in self.roots.clone() {
            let param = &mut self.params[root.0];
            param.parent = None;
            param.absolute_key = param.key.clone();
            param.compact_key = param.key.clone();
            visit(root, &self.params[root.0]);
            self.walk_children(root, &mut visit);
        }
    }

    fn walk_children<F>(&mut self, id: ParamId, visit: &mut F)
    where
        F: FnMut(ParamId, &Param),
    {
        for child in self.params[id.0].children.clone() {
            let parent = &self.params[id.0];
            let key = &self.params[child.0].key;

            let absolute_key = format!("{}.{}", parent.absolute_key, key);
            let compact_key = if parent.is_slice {
                parent.key.clone()
            } else {
                format!("{}.{}", parent.compact_key, key)
            };

            let param = &mut self.params[child.0];
            param.parent = Some(id);
            param.absolute_key = absolute_key;
            param.compact_key = compact_key;

            visit(child, &self.params[child.0]);
            self.walk_children(child, visit);
        }
    }

    /// Every parameter in walk order (each root followed by its subtree).
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &Param)> + '_ {
        let mut order = Vec::with_capacity(self.params.len());
        let mut stack: Vec<ParamId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.params[id.0].children.iter().rev().copied());
        }
        order.into_iter().map(move |id| (id, &self.params[id.0]))
    }

    /// Find a parameter by absolute key.
    pub fn find(&self, absolute_key: &str) -> Option<ParamId> {
        self.iter()
            .find(|(_, p)| p.absolute_key == absolute_key)
            .map(|(id, _)| id)
    }

    /// Build a tree from JSON data.
    ///
    /// Each field of the top-level object becomes a root. Objects become
    /// containers, arrays become slices keyed `0..n`, strings bind as-is,
    /// numbers and booleans bind their textual form and `null` binds the
    /// empty string. Keys are derived before returning.
    pub fn from_json(data: &Value) -> ParamResult<Self> {
        let Value::Object(fields) = data else {
            return Err(ParamError::NotAnObject {
                found: json_kind(data),
            });
        };

        let mut tree = ParamTree::new();
        for (key, value) in fields {
            let root = tree.add_root(Param::new(key));
            tree.bind_json(root, value);
        }
        tree.walk_all(|_, _| {});
        Ok(tree)
    }

    /// Build a tree from any serializable value, e.g. a struct of fields.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> ParamResult<Self> {
        let value = serde_json::to_value(data)?;
        Self::from_json(&value)
    }

    fn bind_json(&mut self, id: ParamId, value: &Value) {
        match value {
            Value::Object(fields) => {
                for (key, field) in fields {
                    let child = self.add_child(id, Param::new(key));
                    self.bind_json(child, field);
                }
            }
            Value::Array(items) => {
                self.params[id.0].is_slice = true;
                for (index, item) in items.iter().enumerate() {
                    let child = self.add_child(id, Param::new(index));
                    self.bind_json(child, item);
                }
            }
            Value::String(s) => self.params[id.0].set_value(s),
            Value::Null => self.params[id.0].value.clear(),
            other => self.params[id.0].set_value(other),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
