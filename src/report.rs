//! Rendering lint results for humans and machines.

use std::fmt::Write as _;

use serde::Serialize;

use crate::runner::FileReport;

/// One line per diagnostic:
///
/// ```text
/// foo.module:12: error [Drupal.Commenting.FunctionComment.Missing] Missing function doc comment
/// ```
///
/// followed by a summary line when anything was found.
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let mut errors = 0;
    let mut warnings = 0;

    for report in reports {
        errors += report.error_count();
        warnings += report.warning_count();
        for diagnostic in &report.diagnostics {
            let _ = writeln!(
                out,
                "{}:{}: {} [{}] {}",
                report.path.display(),
                diagnostic.line,
                diagnostic.severity,
                diagnostic.source(),
                diagnostic.message
            );
        }
    }

    if errors + warnings > 0 {
        let _ = writeln!(
            out,
            "\nFound {errors} {} and {warnings} {} in {} {}.",
            plural(errors, "error"),
            plural(warnings, "warning"),
            reports.len(),
            plural(reports.len(), "file")
        );
    }
    out
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    errors: usize,
    warnings: usize,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    line: u32,
    severity: crate::types::Severity,
    source: String,
    message: &'a str,
    #[serde(skip_serializing_if = "no_data")]
    data: &'a [String],
}

/// A JSON array with one object per file.
pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let files: Vec<JsonFile<'_>> = reports
        .iter()
        .map(|report| JsonFile {
            path: report.path.display().to_string(),
            errors: report.error_count(),
            warnings: report.warning_count(),
            diagnostics: report
                .diagnostics
                .iter()
                .map(|d| JsonDiagnostic {
                    line: d.line,
                    severity: d.severity,
                    source: d.source(),
                    message: &d.message,
                    data: &d.data,
                })
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&files)
}

fn no_data(data: &&[String]) -> bool {
    data.is_empty()
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Diagnostic, Severity};
    use std::path::PathBuf;

    fn report() -> FileReport {
        FileReport {
            path: PathBuf::from("a.module"),
            diagnostics: vec![Diagnostic {
                severity: Severity::Error,
                sniff: "Drupal.Commenting.FunctionComment",
                code: "Missing",
                message: "Missing function doc comment".to_string(),
                data: Vec::new(),
                position: 4,
                line: 3,
            }],
        }
    }

    #[test]
    fn text_lists_each_diagnostic_and_a_summary() {
        let text = render_text(&[report()]);
        assert!(text.starts_with(
            "a.module:3: error [Drupal.Commenting.FunctionComment.Missing] Missing function doc comment\n"
        ));
        assert!(text.ends_with("Found 1 error and 0 warnings in 1 file.\n"));
    }

    #[test]
    fn clean_run_prints_nothing() {
        let clean = FileReport {
            path: PathBuf::from("a.php"),
            diagnostics: Vec::new(),
        };
        assert_eq!(render_text(&[clean]), "");
    }

    #[test]
    fn json_has_counts_and_sources() {
        let json = render_json(&[report()]).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value[0]["path"], "a.module");
        assert_eq!(value[0]["errors"], 1);
        assert_eq!(
            value[0]["diagnostics"][0]["source"],
            "Drupal.Commenting.FunctionComment.Missing"
        );
        assert_eq!(value[0]["diagnostics"][0]["severity"], "error");
        assert!(value[0]["diagnostics"][0].get("data").is_none());
    }
}
