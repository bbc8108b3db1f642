//! Sniffs: token-driven checks that emit [`Diagnostic`]s.
//!
//! A sniff registers the token kinds it wants to see and is then handed
//! every matching token position of a file, one at a time.  Sniffs are
//! stateless: everything a check needs lives in the [`SniffFile`] it is
//! given or in values local to one `process` call.
//!
//! # Submodules
//!
//! - [`function_comment`]: doc comment validation for named functions and
//!   methods.
//! - [`space_unary_operator`]: spacing around `++`, `--` and unary `+`/`-`.

pub mod function_comment;
pub mod space_unary_operator;

use crate::declarations::ParameterSource;
use crate::tokens::{TokenKind, TokenStream};
use crate::types::{Diagnostic, Severity, format_message};

pub use function_comment::FunctionCommentSniff;
pub use space_unary_operator::SpaceUnaryOperatorSniff;

/// Everything a sniff may look at while processing one file.
pub struct SniffFile<'a> {
    pub tokens: &'a TokenStream,
    pub params: &'a dyn ParameterSource,
    /// Line-end marker used when counting line ends in raw text.
    pub eol: &'a str,
}

/// A single check over a token stream.
pub trait Sniff {
    /// Short name used in configuration and on the command line, e.g.
    /// `"FunctionComment"`.
    fn name(&self) -> &'static str;

    /// Dotted source prefix of every diagnostic this sniff emits.
    fn source(&self) -> &'static str;

    /// Token kinds that trigger [`Sniff::process`].
    fn register(&self) -> &'static [TokenKind];

    /// Check the token at `ptr` and return what was found.
    fn process(&self, file: &SniffFile<'_>, ptr: usize) -> Vec<Diagnostic>;
}

/// Every sniff this crate ships, in reporting order.
pub fn all() -> Vec<Box<dyn Sniff>> {
    vec![
        Box::new(FunctionCommentSniff),
        Box::new(SpaceUnaryOperatorSniff),
    ]
}

/// The subset of [`all`] whose short name or source appears in `names`.
///
/// Returns the unknown names alongside so the caller can complain about
/// them.
pub fn select(names: &[String]) -> (Vec<Box<dyn Sniff>>, Vec<String>) {
    let sniffs: Vec<Box<dyn Sniff>> = all()
        .into_iter()
        .filter(|s| names.iter().any(|n| matches_name(s.as_ref(), n)))
        .collect();

    let unknown = names
        .iter()
        .filter(|n| !all().iter().any(|s| matches_name(s.as_ref(), n)))
        .cloned()
        .collect();

    (sniffs, unknown)
}

fn matches_name(sniff: &dyn Sniff, name: &str) -> bool {
    sniff.name().eq_ignore_ascii_case(name) || sniff.source() == name
}

// ─── Reporter ───────────────────────────────────────────────────────────────

/// Collects the diagnostics of one sniff invocation.
///
/// Positions are token indices; positions derived past the end of the
/// stream are kept as-is and their line is clamped to the last token.
pub struct Reporter<'a> {
    sniff: &'static str,
    tokens: &'a TokenStream,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Reporter<'a> {
    pub fn new(sniff: &'static str, tokens: &'a TokenStream) -> Self {
        Self {
            sniff,
            tokens,
            diagnostics: Vec::new(),
        }
    }

    pub fn error(&mut self, message: &str, position: usize, code: &'static str, data: Vec<String>) {
        self.add(Severity::Error, message, position, code, data);
    }

    pub fn warning(
        &mut self,
        message: &str,
        position: usize,
        code: &'static str,
        data: Vec<String>,
    ) {
        self.add(Severity::Warning, message, position, code, data);
    }

    fn add(
        &mut self,
        severity: Severity,
        message: &str,
        position: usize,
        code: &'static str,
        data: Vec<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity,
            sniff: self.sniff,
            code,
            message: format_message(message, &data),
            data,
            position,
            line: self.tokens.line_of(position),
        });
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_by_short_name_or_source() {
        let (sniffs, unknown) = select(&[
            "functioncomment".to_string(),
            "Drupal.Formatting.SpaceUnaryOperator".to_string(),
        ]);
        let names: Vec<&str> = sniffs.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["FunctionComment", "SpaceUnaryOperator"]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn select_reports_unknown_names() {
        let (sniffs, unknown) = select(&["Nope".to_string()]);
        assert!(sniffs.is_empty());
        assert_eq!(unknown, vec!["Nope".to_string()]);
    }

    #[test]
    fn reporter_resolves_placeholders_and_lines() {
        let tokens = crate::tokenizer::tokenize("<?php\n$a = 1;\n");
        let mut reporter = Reporter::new("Test.Sniff", &tokens);
        reporter.error("value %s", 1, "Code", vec!["x".to_string()]);
        reporter.warning("far", 999, "Far", Vec::new());

        let diagnostics = reporter.into_diagnostics();
        assert_eq!(diagnostics[0].message, "value x");
        assert_eq!(diagnostics[0].line, 2);
        assert_eq!(diagnostics[0].source(), "Test.Sniff.Code");
        assert_eq!(diagnostics[1].severity, Severity::Warning);
        assert_eq!(diagnostics[1].line, tokens[tokens.len() - 1].line);
    }
}
