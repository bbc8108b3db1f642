//! Data types shared by the tokenizer, the sniffs and the reporters.
//!
//! This module contains the "model" structs that flow out of the linter:
//! diagnostics with their severity, and the real parameter list reported
//! by the declaration introspector.

use serde::Serialize;

/// How serious a reported finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single finding emitted by a sniff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The sniff that produced the finding (e.g.
    /// `"Drupal.Commenting.FunctionComment"`).
    pub sniff: &'static str,
    /// Stable rule code within the sniff (e.g. `"ParamNameNoMatch"`).
    pub code: &'static str,
    /// The message with every `%s` placeholder already resolved.
    pub message: String,
    /// The values the placeholders were resolved against.
    pub data: Vec<String>,
    /// Token index the finding is anchored to.
    pub position: usize,
    /// 1-based source line of `position`.
    pub line: u32,
}

impl Diagnostic {
    /// The fully-qualified source identifier, `<sniff>.<code>`.
    pub fn source(&self) -> String {
        format!("{}.{}", self.sniff, self.code)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A parameter as actually declared in a function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealParameter {
    /// The parameter name including the `$` prefix (e.g. "$text").
    pub name: String,
    /// Whether this parameter is passed by reference (has `&`).
    pub pass_by_reference: bool,
    /// Whether the parameter declares a default value.
    pub has_default: bool,
    /// Whether this parameter is variadic (has `...`).
    pub is_variadic: bool,
}

impl RealParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pass_by_reference: false,
            has_default: false,
            is_variadic: false,
        }
    }

    pub fn by_reference(mut self) -> Self {
        self.pass_by_reference = true;
        self
    }
}

/// Resolve `%s` placeholders in `template`, in order, against `data`.
///
/// Placeholders without a matching value are left as-is; surplus values
/// are ignored.
pub fn format_message(template: &str, data: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = data.iter();
    let mut rest = template;

    while let Some(idx) = rest.find("%s") {
        out.push_str(&rest[..idx]);
        match values.next() {
            Some(value) => out.push_str(value),
            None => out.push_str("%s"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_resolve_in_order() {
        let data = vec!["$bar".to_string(), "$foo".to_string(), "1".to_string()];
        assert_eq!(
            format_message(
                "Doc comment for var %s does not match actual variable name %s at position %s",
                &data
            ),
            "Doc comment for var $bar does not match actual variable name $foo at position 1"
        );
    }

    #[test]
    fn missing_values_keep_placeholder() {
        let data = vec!["$x".to_string()];
        assert_eq!(format_message("%s at %s", &data), "$x at %s");
    }

    #[test]
    fn surplus_values_are_ignored() {
        let data = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_message("only %s", &data), "only a");
        assert_eq!(format_message("none", &data), "none");
    }
}
