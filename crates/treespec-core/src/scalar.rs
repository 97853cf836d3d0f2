//! # Scalar Type Registry
//!
//! Maps grammar type tags to conversion checks and display names. This is
//! the ONE list of scalar types; every `match` on [`ScalarType`] is
//! exhaustive.
//!
//! | tag | display name | accepts |
//! |---|---|---|
//! | `string` | `string` | any scalar text |
//! | `int` | `int` | base-10 `i32` |
//! | `uint` | `unsigned int` | base-10 `u32` |
//! | `int64` | `long long` | base-10 `i64` |
//! | `uint64` | `unsigned long long` | base-10 `u64` |
//!
//! `enum` is not a scalar type: its test is membership in an allowed list,
//! which the grammar model handles on its own.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConversionError;

/// Grammar tag for enum leaves.
pub const ENUM_TAG: &str = "enum";

/// A scalar type a grammar leaf can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    /// Any scalar; its text is taken as-is.
    String,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    Uint,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    Uint64,
}

impl ScalarType {
    /// Returns all scalar types in registry order.
    pub fn all() -> &'static [ScalarType] {
        &[
            Self::String,
            Self::Int,
            Self::Uint,
            Self::Int64,
            Self::Uint64,
        ]
    }

    /// Look up a grammar type tag. Returns `None` for unknown tags and for
    /// `enum`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "uint" => Some(Self::Uint),
            "int64" => Some(Self::Int64),
            "uint64" => Some(Self::Uint64),
            _ => None,
        }
    }

    /// The tag as spelled in a grammar.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
        }
    }

    /// Human-readable name used in violation messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "unsigned int",
            Self::Int64 => "long long",
            Self::Uint64 => "unsigned long long",
        }
    }

    /// Check that `text` can be read as this type.
    ///
    /// Numeric types never wrap or truncate: a value outside the type's
    /// range is an error, as is any text that is not a base-10 integer.
    pub fn check(&self, text: &str) -> Result<(), ConversionError> {
        match self {
            Self::String => Ok(()),
            Self::Int => self.parse_as::<i32>(text),
            Self::Uint => self.parse_as::<u32>(text),
            Self::Int64 => self.parse_as::<i64>(text),
            Self::Uint64 => self.parse_as::<u64>(text),
        }
    }

    fn parse_as<T: FromStr>(&self, text: &str) -> Result<(), ConversionError> {
        if text.parse::<T>().is_ok() {
            return Ok(());
        }
        // Distinguish "a number, but too big/negative" from "not a number".
        if text.parse::<i128>().is_ok() {
            Err(ConversionError::OutOfRange {
                text: text.to_string(),
                type_name: self.display_name(),
            })
        } else {
            Err(ConversionError::NotNumeric(text.to_string()))
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
