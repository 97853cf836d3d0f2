//! # treespec-schema — Grammar Model & Matching Engine
//!
//! Validates a structured document against a treespec grammar and reports
//! every violation with its grammar path and document path.
//!
//! ## Usage
//!
//! ```
//! use treespec_schema::{validate, Grammar};
//!
//! let grammar = Grammar::from_yaml_str(
//!     "map:\n  name: [ {string: ~} ]\n  age: [ {uint: ~} ]\n",
//! ).unwrap();
//! let document: serde_yaml::Value = serde_yaml::from_str("name: Alice\n").unwrap();
//!
//! let report = validate(&grammar, &document);
//! assert!(!report.valid);
//! assert_eq!(report.violations.violations()[0].reason(), "key: age not found.");
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] — parses a grammar tree once into [`GrammarNode`]s,
//!   rejecting malformed shapes before any document is looked at.
//! - [`validate`](mod@validate) — the [`Validator`] session and the recursive walk.
//! - [`options`] — [`ValidateOptions`] (closed-schema mode).
//! - [`load`] — reads YAML/JSON files into trees.
//!
//! ## Crate Policy
//!
//! - Depends only on `treespec-core` internally.
//! - A malformed grammar is an error; a mismatching document is a report.

pub mod grammar;
pub mod load;
pub mod options;
pub mod validate;

pub use grammar::{Grammar, GrammarNode, LeafSpec};
pub use load::{load_grammar, load_tree, Format, LoadError, LoadedTree};
pub use options::ValidateOptions;
pub use validate::{validate, validate_with, ValidationReport, Validator};

pub use treespec_core::{
    GrammarError, NodeKind, Path, PathSegment, ScalarType, TreeNode, Violation, ViolationKind,
    Violations,
};
