//! # Matching Engine
//!
//! Walks a parsed [`Grammar`] and a document tree in lockstep and records
//! every mismatch as a [`Violation`].
//!
//! ## Walk
//!
//! - **Map** grammar nodes require a document map. Each declared key is
//!   checked in grammar order; a missing key is recorded and the walk moves
//!   on to the next key. Undeclared document keys are ignored unless
//!   [`ValidateOptions::closed`] is set.
//! - **List** grammar nodes require a document sequence. Every element is
//!   checked against the same child grammar, even after a failure.
//! - **Leaf** grammar nodes require a scalar convertible to the declared
//!   type, or equal to one of the enum's allowed values.
//!
//! A shape mismatch prunes only the mismatching subtree; siblings are still
//! checked.
//!
//! ## Paths
//!
//! The grammar path gains `map` / `list` for every map or list grammar node
//! entered, and the key for every map entry. The document path gains the
//! key for every map entry and `[n]` for every list element. A missing key
//! extends the grammar path only, since the document has no node there.

use serde::Serialize;
use tracing::{debug, trace};
use treespec_core::{
    NodeKind, Path, ScalarType, TreeNode, Violation, ViolationKind, Violations,
};

use crate::grammar::{Grammar, GrammarNode, LeafSpec, LIST_KEY, MAP_KEY};
use crate::options::ValidateOptions;

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True iff `violations` is empty.
    pub valid: bool,
    /// Every violation found, in discovery order.
    pub violations: Violations,
}

/// A validation session over one grammar and one document.
///
/// The session owns its path trackers and its violation list; it must not
/// be shared between threads while validating. The grammar and document are
/// only ever read.
#[derive(Debug)]
pub struct Validator<'a, N: TreeNode> {
    grammar: &'a Grammar,
    document: &'a N,
    options: ValidateOptions,
    grammar_path: Path,
    document_path: Path,
    violations: Violations,
}

impl<'a, N: TreeNode> Validator<'a, N> {
    /// Create a session with default options.
    pub fn new(grammar: &'a Grammar, document: &'a N) -> Self {
        Self::with_options(grammar, document, ValidateOptions::default())
    }

    /// Create a session with explicit options.
    pub fn with_options(grammar: &'a Grammar, document: &'a N, options: ValidateOptions) -> Self {
        Self {
            grammar,
            document,
            options,
            grammar_path: Path::root(),
            document_path: Path::root(),
            violations: Violations::new(),
        }
    }

    /// Run one validation pass.
    ///
    /// Returns true iff no violations were found. Violations from an earlier
    /// pass on the same session are discarded first.
    pub fn validate(&mut self) -> bool {
        self.violations = Violations::new();
        self.grammar_path.clear();
        self.document_path.clear();

        debug!(closed = self.options.closed, "starting validation pass");
        let (grammar, document) = (self.grammar, self.document);
        let ok = self.validate_node(grammar.root(), document);
        debug!(ok, violations = self.violations.len(), "validation pass finished");

        debug_assert_eq!(ok, self.violations.is_empty());
        ok
    }

    /// Violations found by the last pass.
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Consume the session, returning its violations.
    pub fn into_violations(self) -> Violations {
        self.violations
    }

    fn validate_node(&mut self, spec: &'a GrammarNode, doc: &'a N) -> bool {
        match spec {
            GrammarNode::Map(entries) => {
                self.grammar_path.push(MAP_KEY);
                let ok = self.validate_map(entries, doc);
                self.grammar_path.pop();
                ok
            }
            GrammarNode::List(child) => {
                self.grammar_path.push(LIST_KEY);
                let ok = self.validate_list(child, doc);
                self.grammar_path.pop();
                ok
            }
            GrammarNode::Leaf(leaf) => self.validate_leaf(leaf, doc),
        }
    }

    fn validate_map(&mut self, entries: &'a [(String, GrammarNode)], doc: &'a N) -> bool {
        if doc.kind() != NodeKind::Map {
            self.record(ViolationKind::StructuralMismatch {
                expected: NodeKind::Map,
                found: doc.kind(),
            });
            return false;
        }

        let mut ok = true;
        for (key, child) in entries {
            match doc.get(key) {
                None => {
                    let grammar_path = self.grammar_path.child(key.as_str());
                    self.record_at(
                        ViolationKind::MissingKey { key: key.clone() },
                        grammar_path,
                        self.document_path.clone(),
                    );
                    ok = false;
                }
                Some(value) => {
                    self.grammar_path.push(key.as_str());
                    self.document_path.push(key.as_str());
                    ok = self.validate_node(child, value) && ok;
                    self.document_path.pop();
                    self.grammar_path.pop();
                }
            }
        }

        if self.options.closed {
            for (key, _) in doc.entries() {
                if !entries.iter().any(|(declared, _)| *declared == *key) {
                    let document_path = self.document_path.child(&*key);
                    self.record_at(
                        ViolationKind::UnexpectedKey {
                            key: key.into_owned(),
                        },
                        self.grammar_path.clone(),
                        document_path,
                    );
                    ok = false;
                }
            }
        }

        ok
    }

    fn validate_list(&mut self, child: &'a GrammarNode, doc: &'a N) -> bool {
        if doc.kind() != NodeKind::Sequence {
            self.record(ViolationKind::StructuralMismatch {
                expected: NodeKind::Sequence,
                found: doc.kind(),
            });
            return false;
        }

        let mut ok = true;
        for (index, element) in doc.elements().enumerate() {
            self.document_path.push(index);
            ok = self.validate_node(child, element) && ok;
            self.document_path.pop();
        }
        ok
    }

    fn validate_leaf(&mut self, leaf: &'a LeafSpec, doc: &'a N) -> bool {
        match leaf {
            LeafSpec::Scalar(ty) => self.check_scalar(*ty, doc),
            LeafSpec::Enum(allowed) => {
                let Some(value) = doc.scalar_text() else {
                    return self.check_scalar(ScalarType::String, doc);
                };
                if allowed.iter().any(|a| *a == *value) {
                    return true;
                }
                self.record(ViolationKind::EnumValueNotAllowed {
                    value: value.into_owned(),
                });
                false
            }
        }
    }

    fn check_scalar(&mut self, ty: ScalarType, doc: &'a N) -> bool {
        let text = match doc.scalar_text() {
            Some(text) => match ty.check(&text) {
                Ok(()) => return true,
                Err(e) => {
                    trace!(error = %e, "scalar conversion failed");
                    text.into_owned()
                }
            },
            None => doc.display_text().into_owned(),
        };
        self.record(ViolationKind::ScalarConversion { text, expected: ty });
        false
    }

    fn record(&mut self, kind: ViolationKind) {
        let (grammar_path, document_path) =
            (self.grammar_path.clone(), self.document_path.clone());
        self.record_at(kind, grammar_path, document_path);
    }

    fn record_at(&mut self, kind: ViolationKind, grammar_path: Path, document_path: Path) {
        let violation = Violation::new(kind, grammar_path, document_path);
        trace!(
            reason = violation.reason(),
            doc_path = %violation.document_path,
            treespec_path = %violation.grammar_path,
            "violation"
        );
        self.violations.push(violation);
    }
}

/// Validate `document` against `grammar` with default options.
pub fn validate<N: TreeNode>(grammar: &Grammar, document: &N) -> ValidationReport {
    validate_with(grammar, document, &ValidateOptions::default())
}

/// Validate `document` against `grammar` with explicit options.
pub fn validate_with<N: TreeNode>(
    grammar: &Grammar,
    document: &N,
    options: &ValidateOptions,
) -> ValidationReport {
    let mut validator = Validator::with_options(grammar, document, options.clone());
    let valid = validator.validate();
    ValidationReport {
        valid,
        violations: validator.into_violations(),
    }
}
