//! Running the enabled sniffs over files.
//!
//! A [`Linter`] owns the sniff set and the [`Config`].  For each file it
//! tokenizes the source, builds the declaration index once, and hands every
//! token to the sniffs that registered for its kind.  Files are independent
//! of each other; nothing is carried from one file to the next.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::declarations::DeclarationIndex;
use crate::sniffs::{self, Sniff, SniffFile};
use crate::tokenizer::tokenize;
use crate::types::Diagnostic;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("unknown sniff: {0}")]
    UnknownSniff(String),
    #[error("no such file or directory: {}", .0.display())]
    MissingPath(PathBuf),
}

/// The diagnostics found in one file, ordered by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

pub struct Linter {
    config: Config,
    sniffs: Vec<Box<dyn Sniff>>,
}

impl Linter {
    /// Build a linter running the sniffs named in `config.sniffs`, or all
    /// of them when the list is empty.
    pub fn new(config: Config) -> Result<Self, LintError> {
        let sniffs = if config.sniffs.is_empty() {
            sniffs::all()
        } else {
            let (selected, unknown) = sniffs::select(&config.sniffs);
            if let Some(name) = unknown.into_iter().next() {
                return Err(LintError::UnknownSniff(name));
            }
            selected
        };
        debug!(
            sniffs = ?sniffs.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "linter ready"
        );
        Ok(Self { config, sniffs })
    }

    /// Lint PHP `source`.  `file_name` only labels the parse.
    pub fn lint_source(&self, file_name: &str, source: &str) -> Vec<Diagnostic> {
        let tokens = tokenize(source);
        let index = DeclarationIndex::build(file_name, source);
        let file = SniffFile {
            tokens: &tokens,
            params: &index,
            eol: &self.config.eol,
        };

        let mut diagnostics = Vec::new();
        for (ptr, token) in tokens.iter().enumerate() {
            for sniff in &self.sniffs {
                if sniff.register().contains(&token.kind) {
                    diagnostics.extend(sniff.process(&file, ptr));
                }
            }
        }

        if !self.config.show_warnings {
            diagnostics.retain(Diagnostic::is_error);
        }
        diagnostics.sort_by_key(|d| d.line);
        debug!(
            file = file_name,
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "linted"
        );
        diagnostics
    }

    /// Lint one file from disk.
    pub fn lint_file(&self, path: &Path) -> std::io::Result<FileReport> {
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes);
        let diagnostics = self.lint_source(&path.to_string_lossy(), &source);
        Ok(FileReport {
            path: path.to_path_buf(),
            diagnostics,
        })
    }

    /// Expand `paths` into the files to lint.
    ///
    /// Files given explicitly are kept whatever their extension.
    /// Directories are walked honouring `.gitignore` and filtered by the
    /// configured extensions.
    pub fn collect_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, LintError> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                files.push(path.clone());
                continue;
            }
            if !path.is_dir() {
                return Err(LintError::MissingPath(path.clone()));
            }

            let mut found = Vec::new();
            for entry in WalkBuilder::new(path).build() {
                match entry {
                    Ok(entry) => {
                        let is_file = entry.file_type().is_some_and(|t| t.is_file());
                        if is_file && self.config.matches_extension(entry.path()) {
                            found.push(entry.into_path());
                        }
                    }
                    Err(err) => warn!(%err, "skipping unreadable entry"),
                }
            }
            found.sort();
            files.extend(found);
        }
        Ok(files)
    }

    /// Lint every file under `paths`.  Files that cannot be read are
    /// logged and skipped.
    pub fn lint_paths(&self, paths: &[PathBuf]) -> Result<Vec<FileReport>, LintError> {
        let files = self.collect_files(paths)?;
        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            match self.lint_file(&path) {
                Ok(report) => reports.push(report),
                Err(err) => warn!(path = %path.display(), %err, "failed to read file"),
            }
        }
        Ok(reports)
    }
}
