//! # Error Types
//!
//! Errors that abort a run, as opposed to [`Violation`](crate::Violation)s,
//! which are accumulated. All errors use `thiserror`.
//!
//! ## Design
//!
//! - A malformed grammar is a precondition failure. It is reported before
//!   any document is looked at and carries the grammar path of the
//!   offending node.
//! - Scalar conversion failures are plain values; the matching engine
//!   turns them into violations.

use thiserror::Error;

use crate::path::Path;

/// The grammar tree does not have a shape the engine understands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A `map` node whose value is not a mapping.
    #[error("malformed grammar at '{path}': 'map' must hold a mapping, found {found}")]
    NotAMapping {
        /// Grammar path of the offending node.
        path: Path,
        /// Kind of node that was found instead.
        found: String,
    },

    /// A node declaring both `map` and `list`.
    #[error("malformed grammar at '{path}': node declares both 'map' and 'list'")]
    MultipleKinds {
        /// Grammar path of the offending node.
        path: Path,
    },

    /// A leaf that is not a one-element sequence holding a one-key mapping.
    #[error("malformed grammar at '{path}': {reason}")]
    BadLeafShape {
        /// Grammar path of the offending node.
        path: Path,
        /// What was wrong with the leaf.
        reason: String,
    },

    /// A leaf type tag not present in the scalar registry.
    #[error("malformed grammar at '{path}': unknown type tag '{tag}'")]
    UnknownTypeTag {
        /// Grammar path of the offending node.
        path: Path,
        /// The unrecognised tag.
        tag: String,
    },

    /// An `enum` leaf with no allowed values.
    #[error("malformed grammar at '{path}': enum must list at least one allowed value")]
    EmptyEnum {
        /// Grammar path of the offending node.
        path: Path,
    },

    /// An `enum` allowed value that is not a scalar.
    #[error("malformed grammar at '{path}': enum value #{index} is a {found}, not a scalar")]
    NonScalarEnumValue {
        /// Grammar path of the offending node.
        path: Path,
        /// Position of the bad value in the allowed list.
        index: usize,
        /// Kind of node that was found instead.
        found: String,
    },
}

impl GrammarError {
    /// Grammar path at which the error was found.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotAMapping { path, .. }
            | Self::MultipleKinds { path }
            | Self::BadLeafShape { path, .. }
            | Self::UnknownTypeTag { path, .. }
            | Self::EmptyEnum { path }
            | Self::NonScalarEnumValue { path, .. } => path,
        }
    }
}

/// A document scalar could not be read as the requested type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The text is not a number at all.
    #[error("'{0}' is not an integer")]
    NotNumeric(String),

    /// The text is a number that does not fit the target type.
    #[error("'{text}' is out of range for {type_name}")]
    OutOfRange {
        /// The scalar text.
        text: String,
        /// Display name of the target type.
        type_name: &'static str,
    },
}
