//! # JSON Tree Adapter
//!
//! [`TreeNode`] for `serde_json::Value`. Numbers and booleans are scalars
//! whose text is their JSON spelling. Object keys keep their source order
//! through serde_json's `preserve_order` feature.

use std::borrow::Cow;

use serde_json::Value;

use crate::tree::{NodeKind, TreeNode};

impl TreeNode for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Null => NodeKind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
            Value::Array(_) => NodeKind::Sequence,
            Value::Object(_) => NodeKind::Map,
        }
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &Self)> + '_> {
        match self {
            Value::Object(map) => Box::new(
                map.iter()
                    .map(|(k, v)| (Cow::Borrowed(k.as_str()), v)),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        match self {
            Value::Array(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }
}
