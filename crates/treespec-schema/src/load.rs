//! # File Loading
//!
//! Reads grammar and document files into trees the engine can walk. The
//! format is chosen from the file extension: `.json` is JSON, everything
//! else is YAML.
//!
//! Loading is kept apart from validation so that callers (the CLI in
//! particular) can tell a file that failed to load from a document that
//! failed to validate.

use std::path::Path;

use thiserror::Error;
use tracing::debug;
use treespec_core::GrammarError;

use crate::grammar::Grammar;
use crate::options::ValidateOptions;
use crate::validate::{validate_with, ValidationReport};

/// Error loading a grammar, document, or options file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// File that failed to read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in '{path}': {source}")]
    Yaml {
        /// File that failed to parse.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        /// File that failed to parse.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed, but is not a well-formed grammar.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Serialized format of a tree file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML (also accepts JSON, which is a YAML subset).
    Yaml,
    /// Strict JSON.
    Json,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// A parsed tree, in whichever library read it.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedTree {
    /// Read by `serde_yaml`.
    Yaml(serde_yaml::Value),
    /// Read by `serde_json`.
    Json(serde_json::Value),
}

impl LoadedTree {
    /// Interpret this tree as a grammar.
    pub fn parse_grammar(&self) -> Result<Grammar, LoadError> {
        let grammar = match self {
            Self::Yaml(value) => Grammar::from_tree(value)?,
            Self::Json(value) => Grammar::from_tree(value)?,
        };
        Ok(grammar)
    }

    /// Validate this tree as a document against `grammar`.
    pub fn validate(&self, grammar: &Grammar, options: &ValidateOptions) -> ValidationReport {
        match self {
            Self::Yaml(value) => validate_with(grammar, value, options),
            Self::Json(value) => validate_with(grammar, value, options),
        }
    }
}

/// Parse `text` in the given format. `origin` names the source in errors.
pub fn parse_tree(text: &str, format: Format, origin: &str) -> Result<LoadedTree, LoadError> {
    match format {
        Format::Yaml => serde_yaml::from_str(text)
            .map(LoadedTree::Yaml)
            .map_err(|source| LoadError::Yaml {
                path: origin.to_string(),
                source,
            }),
        Format::Json => serde_json::from_str(text)
            .map(LoadedTree::Json)
            .map_err(|source| LoadError::Json {
                path: origin.to_string(),
                source,
            }),
    }
}

/// Read and parse a tree file.
pub fn load_tree(path: &Path) -> Result<LoadedTree, LoadError> {
    let text = read_file(path)?;
    let format = Format::from_path(path);
    debug!(path = %path.display(), ?format, "loading tree");
    parse_tree(&text, format, &path.display().to_string())
}

/// Read, parse, and check a grammar file.
pub fn load_grammar(path: &Path) -> Result<Grammar, LoadError> {
    load_tree(path)?.parse_grammar()
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use treespec_core::TreeNode;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("noext")), Format::Yaml);
    }

    #[test]
    fn test_load_yaml_and_json_files() {
        let yaml = write_temp(".yaml", "name: Alice\n");
        let json = write_temp(".json", r#"{"name": "Alice"}"#);
        match load_tree(yaml.path()).unwrap() {
            LoadedTree::Yaml(v) => assert!(TreeNode::get(&v, "name").is_some()),
            other => panic!("expected YAML tree, got {other:?}"),
        }
        match load_tree(json.path()).unwrap() {
            LoadedTree::Json(v) => assert!(TreeNode::get(&v, "name").is_some()),
            other => panic!("expected JSON tree, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_tree(Path::new("/nonexistent/treespec/grammar.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err}");
    }

    #[test]
    fn test_invalid_syntax_errors() {
        let yaml = write_temp(".yaml", "a: [unclosed\n");
        assert!(matches!(load_tree(yaml.path()).unwrap_err(), LoadError::Yaml { .. }));
        let json = write_temp(".json", "{not json");
        assert!(matches!(load_tree(json.path()).unwrap_err(), LoadError::Json { .. }));
    }

    #[test]
    fn test_load_grammar_reports_malformed_grammar() {
        let file = write_temp(".yaml", "map:\n  a: [ {decimal: ~} ]\n");
        let err = load_grammar(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Grammar(GrammarError::UnknownTypeTag { .. })), "{err}");
        assert!(err.to_string().contains("map.a"), "{err}");
    }
}
