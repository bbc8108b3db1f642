//! Linter configuration: `phpantom-lint.toml`.
//!
//! Every key is optional:
//!
//! ```toml
//! eol = "\n"
//! extensions = ["php", "module", "inc"]
//! sniffs = ["FunctionComment"]
//! show_warnings = true
//! ```
//!
//! [`Config::discover`] looks for the file next to the linted paths first
//! (walking up through parent directories), then in the user's config
//! directory (`phpantom/lint.toml`), and falls back to the defaults.

use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Name of the project-level configuration file.
pub const CONFIG_FILE_NAME: &str = "phpantom-lint.toml";

/// File extensions linted when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "php", "module", "inc", "install", "theme", "profile", "test", "engine",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("the eol marker must not be empty")]
    EmptyEol,
}

/// Effective linter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Line-end marker used when counting lines in doc comments.
    pub eol: String,
    /// File extensions (without the dot) picked up when walking
    /// directories.  Files named explicitly are always linted.
    pub extensions: Vec<String>,
    /// Enabled sniffs by short name or source; empty means all.
    pub sniffs: Vec<String>,
    pub show_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eol: "\n".to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            sniffs: Vec::new(),
            show_warnings: true,
        }
    }
}

impl Config {
    /// Parse a configuration document.  `path` is only used for errors.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.eol.is_empty() {
            return Err(ConfigError::EmptyEol);
        }
        Ok(config)
    }

    /// Load the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Find and load the configuration that applies to `start`.
    ///
    /// `start` may be a file or a directory.  Returns the defaults when no
    /// configuration file exists anywhere on the lookup path.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start) {
            Some(path) => {
                debug!(path = %path.display(), "using configuration file");
                Self::load(&path)
            }
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Whether a file found while walking a directory should be linted.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// `phpantom-lint.toml` in `start` or its nearest ancestor, else the user
/// config file if it exists.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let start = if start.is_file() { start.parent()? } else { start };
    let project = start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file());

    project.or_else(|| user_config_file().filter(|path| path.is_file()))
}

/// `<config dir>/phpantom/lint.toml`, following the platform conventions.
pub fn user_config_file() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("phpantom").join("lint.toml"))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = Config::from_toml("", Path::new("x.toml")).expect("valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.eol, "\n");
        assert!(config.show_warnings);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("colour = true", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_eol_is_rejected() {
        let err = Config::from_toml("eol = \"\"", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyEol));
    }

    #[test]
    fn extension_matching_ignores_case() {
        let config = Config::default();
        assert!(config.matches_extension(Path::new("a/b.module")));
        assert!(config.matches_extension(Path::new("B.PHP")));
        assert!(!config.matches_extension(Path::new("README.md")));
        assert!(!config.matches_extension(Path::new("Makefile")));
    }
}
