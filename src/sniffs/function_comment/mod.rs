//! Doc comment validation for functions and methods.
//!
//! [`validate`] runs the whole pipeline for one `function` token:
//!
//! 1. locate the doc comment attached to the declaration ([`locator`]);
//! 2. parse it into a [`DocComment`](crate::docblock::DocComment);
//! 3. cross-reference the `@param` tags with the declared parameters
//!    ([`params`]);
//! 4. check `@return`, `@throws` and `@see` ([`tags`]), then the
//!    description rules ([`description`]).
//!
//! A missing, misplaced, unparsable or empty comment yields exactly one
//! diagnostic and stops the pipeline for that declaration.  Everything
//! after that point is reported independently.
//!
//! Diagnostic positions are token indices.  Because every line of a doc
//! comment is its own token, `comment_start + line` addresses a line of
//! the comment.

mod description;
mod locator;
mod params;
mod tags;

use tracing::debug;

use crate::declarations::ParameterSource;
use crate::docblock;
use crate::tokens::{TokenKind, TokenStream};
use crate::types::Diagnostic;

use super::{Reporter, Sniff, SniffFile};
use locator::{Located, Rejection};

pub const SOURCE: &str = "Drupal.Commenting.FunctionComment";

/// Registers on `function` keywords of named functions and methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionCommentSniff;

impl Sniff for FunctionCommentSniff {
    fn name(&self) -> &'static str {
        "FunctionComment"
    }

    fn source(&self) -> &'static str {
        SOURCE
    }

    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::Function]
    }

    fn process(&self, file: &SniffFile<'_>, ptr: usize) -> Vec<Diagnostic> {
        validate(ptr, file.tokens, file.params, file.eol)
    }
}

/// Per-declaration facts shared by the rule groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionContext {
    pub function_ptr: usize,
    pub method_name: String,
    /// Name of the enclosing class or interface, if any.
    pub class_name: Option<String>,
    pub comment_start: usize,
    pub comment_end: usize,
}

impl FunctionContext {
    /// Constructors, destructors and PHP 4 style constructors (named like
    /// their class) document no return value.
    pub fn is_special_method(&self) -> bool {
        if self.method_name == "__construct" || self.method_name == "__destruct" {
            return true;
        }
        let normalize = |name: &str| name.trim_start_matches('_').to_lowercase();
        self.class_name
            .as_deref()
            .is_some_and(|class| normalize(class) == normalize(&self.method_name))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(comment_start: usize) -> Self {
        Self {
            function_ptr: 0,
            method_name: String::new(),
            class_name: None,
            comment_start,
            comment_end: comment_start,
        }
    }
}

/// Validate the doc comment of the function whose keyword is at
/// `function_ptr`.
///
/// `params` supplies the declared parameters; `eol` is the line-end marker
/// used to count lines inside whitespace runs.
pub fn validate(
    function_ptr: usize,
    tokens: &TokenStream,
    params: &dyn ParameterSource,
    eol: &str,
) -> Vec<Diagnostic> {
    let mut reporter = Reporter::new(SOURCE, tokens);

    let span = match locator::locate(tokens, function_ptr) {
        Located::Nothing => return Vec::new(),
        Located::Rejected(Rejection::WrongStyle) => {
            reporter.error(
                "You must use \"/**\" style comments for a function comment",
                function_ptr,
                "WrongStyle",
                Vec::new(),
            );
            return reporter.into_diagnostics();
        }
        Located::Rejected(Rejection::Missing) => {
            reporter.error(
                "Missing function doc comment",
                function_ptr,
                "Missing",
                Vec::new(),
            );
            return reporter.into_diagnostics();
        }
        Located::Comment(span) => span,
    };

    let ctx = FunctionContext {
        function_ptr,
        method_name: tokens.declaration_name(function_ptr).unwrap_or_default().to_string(),
        class_name: tokens
            .enclosing_class(function_ptr)
            .and_then(|class| tokens.declaration_name(class))
            .map(str::to_string),
        comment_start: span.start,
        comment_end: span.end,
    };

    let text = tokens.content_between(ctx.comment_start, ctx.comment_end);
    let comment = match docblock::parse(&text, eol) {
        Ok(comment) => comment,
        Err(err) => {
            debug!(function = %ctx.method_name, %err, "doc comment failed to parse");
            reporter.error(
                &err.to_string(),
                ctx.comment_start + err.line(),
                "FailedParse",
                Vec::new(),
            );
            return reporter.into_diagnostics();
        }
    };

    if comment.is_empty() {
        reporter.error(
            "Function doc comment is empty",
            ctx.comment_start,
            "Empty",
            Vec::new(),
        );
        return reporter.into_diagnostics();
    }

    debug!(
        function = %ctx.method_name,
        comment_start = ctx.comment_start,
        comment_end = ctx.comment_end,
        params = comment.params.len(),
        "checking function comment"
    );

    let real_params = params.parameters(tokens, ctx.function_ptr);
    params::check(&ctx, &comment, &real_params, eol, &mut reporter);
    tags::check_return(&ctx, &comment, eol, &mut reporter);
    tags::check_throws(&ctx, &comment, &mut reporter);
    tags::check_sees(&ctx, &comment, &mut reporter);
    description::check_hook(&ctx, &comment, &mut reporter);
    description::check_spacing(&ctx, &comment, eol, &mut reporter);

    reporter.into_diagnostics()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
