//! # Violations
//!
//! A [`Violation`] is one mismatch between a document and its grammar,
//! located by both a grammar path and a document path. Violations are
//! collected, never thrown: a validation pass reports all of them.
//!
//! ## Text Format
//!
//! The `Display` impls reproduce the report layout of the command-line
//! tool:
//!
//! ```text
//! REASON: key: age not found.
//!   doc path:
//!   treespec path: map.age
//!
//! ```

use std::fmt;

use serde::Serialize;

use crate::path::Path;
use crate::scalar::ScalarType;
use crate::tree::NodeKind;

/// What went wrong at a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The document node's shape disagrees with the grammar's map/list.
    StructuralMismatch {
        /// Shape the grammar requires.
        expected: NodeKind,
        /// Shape the document has.
        found: NodeKind,
    },

    /// A key declared by the grammar is absent from the document map.
    MissingKey {
        /// The missing key.
        key: String,
    },

    /// A key present in the document but not declared by the grammar.
    /// Only reported in closed-schema mode.
    UnexpectedKey {
        /// The undeclared key.
        key: String,
    },

    /// A leaf could not be read as its declared scalar type.
    ScalarConversion {
        /// Textual form of the document node.
        text: String,
        /// The declared type.
        expected: ScalarType,
    },

    /// A leaf value is not in its enum's allowed list.
    EnumValueNotAllowed {
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuralMismatch { expected, found } => {
                write!(f, "expected {expected}, but found {found}")
            }
            Self::MissingKey { key } => write!(f, "key: {key} not found."),
            Self::UnexpectedKey { key } => write!(f, "key: {key} not allowed."),
            Self::ScalarConversion { text, expected } => {
                write!(f, "unable to convert '{text}' to '{}'.", expected.display_name())
            }
            Self::EnumValueNotAllowed { value } => {
                write!(f, "enum string '{value}' is not allowed.")
            }
        }
    }
}

/// One recorded mismatch with its location in both trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// What went wrong.
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// Human-readable reason; always `kind.to_string()`.
    pub reason: String,
    /// Location in the grammar tree.
    pub grammar_path: Path,
    /// Location in the document tree.
    pub document_path: Path,
}

impl Violation {
    /// Build a violation, rendering its reason from `kind`.
    pub fn new(kind: ViolationKind, grammar_path: Path, document_path: Path) -> Self {
        Self {
            reason: kind.to_string(),
            kind,
            grammar_path,
            document_path,
        }
    }

    /// Human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REASON: {}", self.reason)?;
        writeln!(f, "  doc path: {}", self.document_path)?;
        writeln!(f, "  treespec path: {}", self.grammar_path)?;
        writeln!(f)
    }
}

/// Ordered, append-only collection of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.violations {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
