//! Drupal coding standard checks for PHP doc comments.
//!
//! The heart of the crate is the function comment sniff: for every named
//! function or method it finds the attached `/** */` block, parses it into a
//! structured [`DocComment`](docblock::DocComment) and checks layout,
//! spacing and the `@param` tags against the parameters the declaration
//! really has.  A small unary operator spacing sniff rides along.
//!
//! # Modules
//!
//! - [`tokens`], [`tokenizer`]: the token stream the sniffs navigate.
//! - [`declarations`]: real parameter lists, read from the `mago_syntax` AST.
//! - [`docblock`]: the doc comment parser.
//! - [`sniffs`]: the [`Sniff`](sniffs::Sniff) trait and the sniffs.
//! - [`config`], [`runner`], [`report`]: configuration, file-level
//!   orchestration and output.
//!
//! ```no_run
//! use phpantom_lint::{Config, Linter};
//!
//! let linter = Linter::new(Config::default()).unwrap();
//! for diagnostic in linter.lint_source("demo.module", "<?php\nfunction demo() {}\n") {
//!     println!("{}: {}", diagnostic.line, diagnostic.message);
//! }
//! ```

pub mod config;
pub mod declarations;
pub mod docblock;
pub mod report;
pub mod runner;
pub mod sniffs;
pub mod tokenizer;
pub mod tokens;
pub mod types;
pub mod util;

pub use config::{Config, ConfigError};
pub use declarations::{DeclarationIndex, ParameterSource};
pub use runner::{FileReport, LintError, Linter};
pub use sniffs::function_comment::validate;
pub use tokenizer::tokenize;
pub use types::{Diagnostic, RealParameter, Severity};
