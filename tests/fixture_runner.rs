//! Fixture-driven tests.
//!
//! Every `tests/fixtures/*.php` / `*.module` file is linted with the
//! default configuration and compared with the sibling `.expected` file:
//! one `line: severity [source] message` line per diagnostic.

use datatest_stable::Utf8Path;
use phpantom_lint::{Config, Linter};

fn lint_fixture(path: &Utf8Path, source: String) -> datatest_stable::Result<()> {
    let expected_path = path.with_extension("expected");
    let expected = std::fs::read_to_string(&expected_path)
        .map_err(|e| format!("{expected_path}: {e}"))?;

    let linter = Linter::new(Config::default())?;
    let actual: String = linter
        .lint_source(path.as_str(), &source)
        .iter()
        .map(|d| {
            format!(
                "{}: {} [{}] {}\n",
                d.line,
                d.severity,
                d.source(),
                d.message
            )
        })
        .collect();

    if actual != expected {
        return Err(format!(
            "{path}: diagnostics differ\n--- expected\n{expected}--- actual\n{actual}"
        )
        .into());
    }
    Ok(())
}

datatest_stable::harness! {
    { test = lint_fixture, root = "tests/fixtures", pattern = r"\.(php|module)$" },
}
