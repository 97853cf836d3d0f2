//! # Tree Reader Interface
//!
//! The matching engine reads grammars and documents only through the
//! [`TreeNode`] trait. Adapters for concrete tree libraries live next to
//! it, in the `yaml` and `json` modules.
//!
//! ## Contract
//!
//! - `kind()` reports one of [`NodeKind`]'s four variants.
//! - `entries()` yields map entries in a stable order (the order the tree
//!   library keeps, normally source order). Keys are given as text.
//! - `elements()` yields sequence children in document order.
//! - `scalar_text()` is `Some` exactly for [`NodeKind::Scalar`] nodes.
//!
//! Non-map nodes yield no entries and non-sequence nodes yield no elements.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// The shape of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// An explicit null / empty value.
    Null,
    /// A string, number, or boolean.
    Scalar,
    /// An ordered sequence.
    Sequence,
    /// A key/value mapping.
    Map,
}

impl NodeKind {
    /// Name used in violation messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::Sequence => "list",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a node in a structured-data tree.
pub trait TreeNode {
    /// Shape of this node.
    fn kind(&self) -> NodeKind;

    /// Map entries as `(key text, child)` pairs. Empty for non-maps.
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &Self)> + '_>;

    /// Sequence children in order. Empty for non-sequences.
    fn elements(&self) -> Box<dyn Iterator<Item = &Self> + '_>;

    /// Textual form of a scalar. `None` for null, sequences, and maps.
    fn scalar_text(&self) -> Option<Cow<'_, str>>;

    /// Look up a map entry by key text.
    ///
    /// The default scans [`entries`](Self::entries); adapters with a keyed
    /// index should override it.
    fn get(&self, key: &str) -> Option<&Self> {
        self.entries()
            .find(|(k, _)| *k == key)
            .map(|(_, child)| child)
    }

    /// Text used to quote this node in a violation message: the scalar
    /// text, or a placeholder naming the kind (`null`, `<list>`, `<map>`).
    fn display_text(&self) -> Cow<'_, str> {
        match self.scalar_text() {
            Some(text) => text,
            None => match self.kind() {
                NodeKind::Null => Cow::Borrowed("null"),
                NodeKind::Sequence => Cow::Borrowed("<list>"),
                NodeKind::Map => Cow::Borrowed("<map>"),
                NodeKind::Scalar => Cow::Borrowed(""),
            },
        }
    }
}
