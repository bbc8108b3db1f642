#![allow(dead_code)]

use phpantom_lint::tokens::{TokenKind, TokenStream};
use phpantom_lint::{Config, Diagnostic, Linter, ParameterSource, RealParameter};
use std::fs;

/// Lint `src` with every sniff and the default configuration.
pub fn lint(src: &str) -> Vec<Diagnostic> {
    Linter::new(Config::default())
        .expect("default linter")
        .lint_source("test.module", src)
}

/// Lint `src` with only the named sniff enabled.
pub fn lint_with(sniff: &str, src: &str) -> Vec<Diagnostic> {
    let config = Config {
        sniffs: vec![sniff.to_string()],
        ..Config::default()
    };
    Linter::new(config)
        .expect("known sniff")
        .lint_source("test.module", src)
}

/// The rule codes of `diagnostics`, in order.
pub fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.code).collect()
}

/// `(line, code)` pairs of `diagnostics`, in order.
pub fn lines_and_codes(diagnostics: &[Diagnostic]) -> Vec<(u32, &'static str)> {
    diagnostics.iter().map(|d| (d.line, d.code)).collect()
}

/// Index of the first `function` keyword.
pub fn first_function(tokens: &TokenStream) -> usize {
    tokens
        .find_next(&[TokenKind::Function], 0)
        .expect("source has a function")
}

/// A parameter source that ignores the tokens and returns a fixed list.
pub struct FixedParams(pub Vec<RealParameter>);

impl ParameterSource for FixedParams {
    fn parameters(&self, _tokens: &TokenStream, _function_ptr: usize) -> Vec<RealParameter> {
        self.0.clone()
    }
}

/// Wrap a function with a file header so the doc comment under test is not
/// mistaken for the file comment.
pub fn with_header(body: &str) -> String {
    format!("<?php\n\n/**\n * @file\n * Test file.\n */\n\n{body}")
}

/// Helper: create a temp directory populated with `files`.
pub fn create_workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write file");
    }
    dir
}
