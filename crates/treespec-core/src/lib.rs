//! # treespec-core — Foundational Types for treespec
//!
//! This crate defines the vocabulary shared by the grammar model, the
//! matching engine, and the command-line tool. It depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **One stable tree interface.** The [`TreeNode`] trait is the only way
//!    the engine looks at a grammar or a document. Each tree library gets an
//!    adapter; the engine never touches a library's node API directly.
//!
//!    `serde_yaml::Value` and `serde_json::Value` implement it here, behind
//!    the default `yaml` and `json` features.
//!
//! 2. **Closed scalar registry.** [`ScalarType`] is an exhaustive enum.
//!    Adding a scalar type forces every `match` to handle it.
//!
//! 3. **Dual paths.** Every [`Violation`] carries both the grammar path and
//!    the document path, because the two trees diverge under list nodes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `treespec-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod path;
pub mod scalar;
pub mod tree;
pub mod violation;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export primary types for ergonomic imports.
pub use error::{ConversionError, GrammarError};
pub use path::{Path, PathSegment};
pub use scalar::ScalarType;
pub use tree::{NodeKind, TreeNode};
pub use violation::{Violation, ViolationKind, Violations};
