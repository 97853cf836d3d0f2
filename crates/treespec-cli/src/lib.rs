//! # treespec-cli — Command-Line Interface
//!
//! Provides the `treespec` binary:
//!
//! ```bash
//! treespec grammar.yaml document.yaml
//! treespec --closed --format json grammar.yaml document.json
//! ```
//!
//! ## Exit Codes
//!
//! | code | meaning |
//! |---|---|
//! | 0 | document is valid |
//! | 1 | document is invalid, or the grammar failed to load |
//! | 2 | document failed to load |
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; [`check`] holds the handler.
//! - Handler functions delegate to `treespec-schema` — no matching logic here.
//! - The text report layout is fixed; scripts parse it.

pub mod check;
