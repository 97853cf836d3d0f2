//! # Check Command
//!
//! Loads a grammar and a document, validates, and prints the report.
//!
//! Text output is silent on success. On failure it prints the
//! `ERRORS FOUND: ` header, a blank line, then one block per violation:
//!
//! ```text
//! REASON: key: age not found.
//!   doc path:
//!   treespec path: map.age
//!
//! ```
//!
//! JSON output always prints the full report.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use treespec_schema::{load_grammar, load_tree, ValidateOptions, ValidationReport};

/// Exit code for a valid document.
pub const EXIT_VALID: u8 = 0;
/// Exit code for an invalid document.
pub const EXIT_INVALID: u8 = 1;
/// Exit code when the grammar cannot be loaded.
pub const EXIT_GRAMMAR_ERROR: u8 = 1;
/// Exit code when the document cannot be loaded.
pub const EXIT_DOCUMENT_ERROR: u8 = 2;

/// Arguments for a validation run.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Grammar (treespec) file, YAML or JSON.
    pub grammar: PathBuf,

    /// Document to validate, YAML or JSON.
    pub document: PathBuf,

    /// Also report document keys that the grammar does not declare.
    #[arg(long)]
    pub closed: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// YAML file with validation options. Flags override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The classic `ERRORS FOUND` listing.
    Text,
    /// The report as pretty-printed JSON.
    Json,
}

/// Resolve the effective options: the config file if given, then flags.
fn resolve_options(args: &CheckArgs) -> Result<ValidateOptions> {
    let options = match &args.config {
        Some(path) => ValidateOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => ValidateOptions::default(),
    };
    if args.closed {
        return Ok(options.with_closed(true));
    }
    Ok(options)
}

/// Execute a validation run, writing the report to `out`.
///
/// Load failures are logged and mapped to their exit codes; only option
/// and output errors (including a failed flush) are returned as `Err`.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let options = resolve_options(args)?;

    let grammar = match load_grammar(&args.grammar) {
        Ok(grammar) => grammar,
        Err(e) => {
            tracing::error!("Error reading grammar: {e}");
            return Ok(EXIT_GRAMMAR_ERROR);
        }
    };

    let document = match load_tree(&args.document) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Error reading document: {e}");
            return Ok(EXIT_DOCUMENT_ERROR);
        }
    };

    let report = document.validate(&grammar, &options);
    tracing::info!(
        valid = report.valid,
        violations = report.violations.len(),
        document = %args.document.display(),
        "validation finished"
    );

    match args.format {
        OutputFormat::Text => write_text(&report, out)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            writeln!(out, "{json}")?;
        }
    }
    out.flush().context("writing report")?;

    Ok(if report.valid { EXIT_VALID } else { EXIT_INVALID })
}

fn write_text(report: &ValidationReport, out: &mut impl Write) -> Result<()> {
    if !report.valid {
        writeln!(out, "ERRORS FOUND: ")?;
        writeln!(out)?;
        write!(out, "{}", report.violations)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const PERSON: &str = "map:\n  name: [ {string: ~} ]\n  age: [ {uint: ~} ]\n";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn args(grammar: PathBuf, document: PathBuf) -> CheckArgs {
        CheckArgs {
            grammar,
            document,
            closed: false,
            format: OutputFormat::Text,
            config: None,
        }
    }

    fn run(args: &CheckArgs) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_check(args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_valid_document_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let d = write(dir.path(), "d.yaml", "name: Alice\nage: 30\n");
        let (code, out) = run(&args(g, d));
        assert_eq!(code, EXIT_VALID);
        assert!(out.is_empty(), "{out}");
    }

    #[test]
    fn test_invalid_document_prints_report() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let d = write(dir.path(), "d.yaml", "name: Alice\n");
        let (code, out) = run(&args(g, d));
        assert_eq!(code, EXIT_INVALID);
        assert_eq!(
            out,
            "ERRORS FOUND: \n\nREASON: key: age not found.\n  doc path: \n  treespec path: map.age\n\n"
        );
    }

    #[test]
    fn test_grammar_load_failure_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", "map: [unclosed\n");
        let d = write(dir.path(), "d.yaml", "a: 1\n");
        assert_eq!(run(&args(g, d)).0, EXIT_GRAMMAR_ERROR);
    }

    #[test]
    fn test_malformed_grammar_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", "map:\n  a: [ {float: ~} ]\n");
        let d = write(dir.path(), "d.yaml", "a: 1\n");
        assert_eq!(run(&args(g, d)).0, EXIT_GRAMMAR_ERROR);
    }

    #[test]
    fn test_document_load_failure_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let missing = dir.path().join("missing.yaml");
        assert_eq!(run(&args(g, missing)).0, EXIT_DOCUMENT_ERROR);
    }

    #[test]
    fn test_json_format_always_prints_report() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let d = write(dir.path(), "d.json", r#"{"name": "Alice", "age": 30}"#);
        let mut a = args(g, d);
        a.format = OutputFormat::Json;
        let (code, out) = run(&a);
        assert_eq!(code, EXIT_VALID);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["violations"], serde_json::json!([]));
    }

    #[test]
    fn test_closed_flag_and_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let d = write(dir.path(), "d.yaml", "name: A\nage: 1\nextra: x\n");

        assert_eq!(run(&args(g.clone(), d.clone())).0, EXIT_VALID);

        let mut flagged = args(g.clone(), d.clone());
        flagged.closed = true;
        let (code, out) = run(&flagged);
        assert_eq!(code, EXIT_INVALID);
        assert!(out.contains("REASON: key: extra not allowed."), "{out}");

        let mut configured = args(g, d);
        configured.config = Some(write(dir.path(), "opts.yaml", "closed: true\n"));
        assert_eq!(run(&configured).0, EXIT_INVALID);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let d = write(dir.path(), "d.yaml", "name: A\nage: 1\n");
        let mut a = args(g, d);
        a.config = Some(write(dir.path(), "opts.yaml", "unknown_option: 1\n"));
        let err = run_check(&a, &mut Vec::<u8>::new()).unwrap_err();
        assert!(format!("{err:#}").contains("opts.yaml"), "{err:#}");
    }

    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }
    }

    #[test]
    fn test_flush_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(dir.path(), "g.yaml", PERSON);
        let d = write(dir.path(), "d.yaml", "name: Alice
");
        let err = run_check(&args(g, d), &mut FailingFlush(Vec::new())).unwrap_err();
        assert!(format!("{err:#}").contains("writing report"), "{err:#}");
    }
}
