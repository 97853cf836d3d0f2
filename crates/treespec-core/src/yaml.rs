//! # YAML Tree Adapter
//!
//! [`TreeNode`] for `serde_yaml::Value`.
//!
//! YAML has a richer type system than the tree interface (tags, non-string
//! keys, typed scalars). The adapter flattens it:
//!
//! - tagged values are read through their inner value;
//! - numbers and booleans are scalars whose text is their canonical form,
//!   so `5` reads as the text `5`;
//! - scalar map keys are compared by text; sequence/map keys are skipped.

use std::borrow::Cow;

use serde_yaml::Value;

use crate::tree::{NodeKind, TreeNode};

fn key_text(key: &Value) -> Option<Cow<'_, str>> {
    match key {
        Value::Null => Some(Cow::Borrowed("null")),
        Value::Tagged(tagged) => key_text(&tagged.value),
        other => other.scalar_text(),
    }
}

impl TreeNode for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Null => NodeKind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
            Value::Sequence(_) => NodeKind::Sequence,
            Value::Mapping(_) => NodeKind::Map,
            Value::Tagged(tagged) => tagged.value.kind(),
        }
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &Self)> + '_> {
        match self {
            Value::Mapping(map) => Box::new(
                map.iter()
                    .filter_map(|(k, v)| key_text(k).map(|k| (k, v))),
            ),
            Value::Tagged(tagged) => tagged.value.entries(),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        match self {
            Value::Sequence(items) => Box::new(items.iter()),
            Value::Tagged(tagged) => tagged.value.elements(),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Tagged(tagged) => tagged.value.scalar_text(),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Mapping(map) => map.get(key).or_else(|| {
                map.iter()
                    .find(|(k, _)| key_text(k).as_deref() == Some(key))
                    .map(|(_, v)| v)
            }),
            Value::Tagged(tagged) => TreeNode::get(&tagged.value, key),
            _ => None,
        }
    }
}
