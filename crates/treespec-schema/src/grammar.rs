//! # Grammar Model
//!
//! A treespec grammar is itself a tree. Each node is one of:
//!
//! ```yaml
//! map:                  # a mapping with a `map` key
//!   name: [ {string: ~} ]
//! list: <node>          # a mapping with a `list` key
//! [ {uint: ~} ]         # a leaf: one-element sequence, one-key mapping
//! [ {enum: [a, b]} ]    # an enum leaf: the data lists the allowed values
//! ```
//!
//! [`Grammar::from_tree`] classifies every node once and rejects malformed
//! shapes up front, so the matching engine only ever sees a well-formed
//! [`GrammarNode`] tree.

use tracing::debug;

use treespec_core::scalar::ENUM_TAG;
use treespec_core::{GrammarError, NodeKind, Path, ScalarType, TreeNode};

use crate::load::{self, Format, LoadError};

/// Key marking a map grammar node.
pub const MAP_KEY: &str = "map";
/// Key marking a list grammar node.
pub const LIST_KEY: &str = "list";

/// A parsed grammar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarNode {
    /// Expected document map, with entries in declaration order.
    Map(Vec<(String, GrammarNode)>),
    /// Expected document sequence; the child governs every element.
    List(Box<GrammarNode>),
    /// Expected document scalar.
    Leaf(LeafSpec),
}

/// Constraint carried by a leaf grammar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafSpec {
    /// The scalar must convert to this type.
    Scalar(ScalarType),
    /// The scalar must equal one of these values (case-sensitive).
    Enum(Vec<String>),
}

impl GrammarNode {
    /// Document kind this node expects.
    pub fn expected_kind(&self) -> NodeKind {
        match self {
            Self::Map(_) => NodeKind::Map,
            Self::List(_) => NodeKind::Sequence,
            Self::Leaf(_) => NodeKind::Scalar,
        }
    }
}

/// A validated grammar, ready to check any number of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    root: GrammarNode,
}

impl Grammar {
    /// Wrap an already-built root node.
    pub fn new(root: GrammarNode) -> Self {
        Self { root }
    }

    /// Parse a grammar from any tree.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] naming the grammar path of the first
    /// malformed node.
    pub fn from_tree<N: TreeNode>(tree: &N) -> Result<Self, GrammarError> {
        let mut path = Path::root();
        let root = parse_node(tree, &mut path)?;
        debug!(root = %root.expected_kind(), "parsed grammar");
        Ok(Self { root })
    }

    /// Parse a grammar from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, LoadError> {
        load::parse_tree(text, Format::Yaml, "<string>")?.parse_grammar()
    }

    /// Parse a grammar from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        load::parse_tree(text, Format::Json, "<string>")?.parse_grammar()
    }

    /// Root node.
    pub fn root(&self) -> &GrammarNode {
        &self.root
    }
}

fn parse_node<N: TreeNode>(node: &N, path: &mut Path) -> Result<GrammarNode, GrammarError> {
    if node.kind() == NodeKind::Map {
        match (node.get(MAP_KEY), node.get(LIST_KEY)) {
            (Some(_), Some(_)) => {
                return Err(GrammarError::MultipleKinds { path: path.clone() });
            }
            (Some(spec), None) => {
                path.push(MAP_KEY);
                let parsed = parse_map(spec, path);
                path.pop();
                return parsed;
            }
            (None, Some(spec)) => {
                path.push(LIST_KEY);
                let parsed = parse_node(spec, path);
                path.pop();
                return parsed.map(|child| GrammarNode::List(Box::new(child)));
            }
            (None, None) => {}
        }
    }
    parse_leaf(node, path).map(GrammarNode::Leaf)
}

fn parse_map<N: TreeNode>(spec: &N, path: &mut Path) -> Result<GrammarNode, GrammarError> {
    if spec.kind() != NodeKind::Map {
        return Err(GrammarError::NotAMapping {
            path: path.clone(),
            found: spec.kind().to_string(),
        });
    }
    let mut entries = Vec::new();
    for (key, child) in spec.entries() {
        path.push(&*key);
        let parsed = parse_node(child, path);
        path.pop();
        entries.push((key.into_owned(), parsed?));
    }
    Ok(GrammarNode::Map(entries))
}

fn parse_leaf<N: TreeNode>(node: &N, path: &Path) -> Result<LeafSpec, GrammarError> {
    let bad_shape = |reason: String| GrammarError::BadLeafShape {
        path: path.clone(),
        reason,
    };

    if node.kind() != NodeKind::Sequence {
        return Err(bad_shape(format!(
            "expected 'map', 'list', or a one-element type list, found {}",
            node.kind()
        )));
    }
    let mut elements = node.elements();
    let typespec = match (elements.next(), elements.next()) {
        (Some(only), None) => only,
        (None, _) => return Err(bad_shape("type list is empty".to_string())),
        (Some(_), Some(_)) => {
            return Err(bad_shape("type list must hold exactly one entry".to_string()))
        }
    };
    if typespec.kind() != NodeKind::Map {
        return Err(bad_shape(format!(
            "type entry must be a mapping, found {}",
            typespec.kind()
        )));
    }

    let mut entries = typespec.entries();
    let (tag, data) = match (entries.next(), entries.next()) {
        (Some(only), None) => only,
        (None, _) => return Err(bad_shape("type entry has no type tag".to_string())),
        (Some(_), Some(_)) => {
            return Err(bad_shape("type entry must hold exactly one type tag".to_string()))
        }
    };

    if tag == ENUM_TAG {
        return parse_enum(data, path);
    }
    ScalarType::from_tag(&tag)
        .map(LeafSpec::Scalar)
        .ok_or_else(|| GrammarError::UnknownTypeTag {
            path: path.clone(),
            tag: tag.into_owned(),
        })
}

fn parse_enum<N: TreeNode>(data: &N, path: &Path) -> Result<LeafSpec, GrammarError> {
    if data.kind() != NodeKind::Sequence {
        return Err(GrammarError::BadLeafShape {
            path: path.clone(),
            reason: format!("enum values must be a list, found {}", data.kind()),
        });
    }
    let mut allowed = Vec::new();
    for (index, value) in data.elements().enumerate() {
        let text = value
            .scalar_text()
            .ok_or_else(|| GrammarError::NonScalarEnumValue {
                path: path.clone(),
                index,
                found: value.kind().to_string(),
            })?;
        allowed.push(text.into_owned());
    }
    if allowed.is_empty() {
        return Err(GrammarError::EmptyEnum { path: path.clone() });
    }
    Ok(LeafSpec::Enum(allowed))
}
