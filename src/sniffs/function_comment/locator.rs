//! Finding the doc comment that belongs to a function token.

use tracing::trace;

use crate::tokens::{TokenKind, TokenStream};

/// Kinds that stop the backward search for a comment.
const COMMENT_OR_CONTEXT: &[TokenKind] = &[
    TokenKind::Comment,
    TokenKind::DocComment,
    TokenKind::Class,
    TokenKind::Function,
    TokenKind::OpenTag,
];

/// Kinds allowed between a doc comment and its `function` keyword.
const IGNORABLE: &[TokenKind] = &[
    TokenKind::Public,
    TokenKind::Protected,
    TokenKind::Private,
    TokenKind::Static,
    TokenKind::Whitespace,
    TokenKind::Abstract,
    TokenKind::Final,
];

/// Token range of an attached doc comment, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CommentSpan {
    pub start: usize,
    pub end: usize,
}

/// Why a function has no usable doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Rejection {
    /// The nearest comment is a `//`, `#` or `/* */` comment.
    WrongStyle,
    /// No comment, a comment separated by code, or the file header.
    Missing,
}

/// Result of looking for a function's doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Located {
    /// Nothing precedes the function; there is nothing to check.
    Nothing,
    Rejected(Rejection),
    Comment(CommentSpan),
}

/// Locate the doc comment of the function whose keyword is at
/// `function_ptr`.
pub(super) fn locate(tokens: &TokenStream, function_ptr: usize) -> Located {
    let Some(before) = function_ptr.checked_sub(1) else {
        return Located::Nothing;
    };
    let Some(comment_end) = tokens.find_previous(COMMENT_OR_CONTEXT, before) else {
        return Located::Nothing;
    };

    match tokens[comment_end].kind {
        TokenKind::DocComment => {}
        TokenKind::Comment => {
            trace!(function_ptr, comment_end, "nearest comment is not a doc comment");
            return Located::Rejected(Rejection::WrongStyle);
        }
        kind => {
            trace!(function_ptr, ?kind, "no comment before declaration");
            return Located::Rejected(Rejection::Missing);
        }
    }

    // Anything but modifiers and whitespace in between detaches the comment.
    if tokens.find_previous_excluding(IGNORABLE, before) != Some(comment_end) {
        trace!(function_ptr, comment_end, "code between doc comment and declaration");
        return Located::Rejected(Rejection::Missing);
    }

    let start = comment_end
        .checked_sub(1)
        .and_then(|p| tokens.find_previous_excluding(&[TokenKind::DocComment], p))
        .map_or(0, |p| p + 1);

    if is_file_header(tokens, start, function_ptr) {
        trace!(function_ptr, comment_start = start, "doc comment is the file header");
        return Located::Rejected(Rejection::Missing);
    }

    Located::Comment(CommentSpan {
        start,
        end: comment_end,
    })
}

/// A doc comment that directly follows the first open tag of the file
/// documents the file, not the function after it.
fn is_file_header(tokens: &TokenStream, comment_start: usize, function_ptr: usize) -> bool {
    let Some(prev) = comment_start
        .checked_sub(1)
        .and_then(|p| tokens.find_previous_excluding(&[TokenKind::Whitespace], p))
    else {
        return false;
    };
    if tokens[prev].kind != TokenKind::OpenTag {
        return false;
    }

    let earlier_open_tag = prev
        .checked_sub(1)
        .and_then(|p| tokens.find_previous(&[TokenKind::OpenTag], p));
    function_ptr == 0 || earlier_open_tag.is_none()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn function_ptr(tokens: &TokenStream) -> usize {
        tokens
            .find_next(&[TokenKind::Function], 0)
            .expect("function token")
    }

    #[test]
    fn finds_multi_line_doc_comment() {
        let src = "<?php\n\n/**\n * @file\n */\n\n/**\n * Foo.\n */\nfunction foo() {}\n";
        let tokens = tokenize(src);
        let Located::Comment(span) = locate(&tokens, function_ptr(&tokens)) else {
            panic!("expected a comment");
        };
        assert_eq!(tokens[span.start].content, "/**\n");
        assert_eq!(tokens[span.end].content, " */");
        assert_eq!(span.end - span.start, 2);
    }

    #[test]
    fn modifiers_may_sit_between_comment_and_function() {
        let src = "<?php\n\n/**\n * @file\n */\n\nclass A {\n  /**\n   * Foo.\n   */\n  final public static function foo() {}\n}\n";
        let tokens = tokenize(src);
        assert!(matches!(
            locate(&tokens, function_ptr(&tokens)),
            Located::Comment(_)
        ));
    }

    #[test]
    fn line_comment_is_wrong_style() {
        let tokens = tokenize("<?php\n\n// Foo.\nfunction foo() {}\n");
        assert_eq!(
            locate(&tokens, function_ptr(&tokens)),
            Located::Rejected(Rejection::WrongStyle)
        );
    }

    #[test]
    fn code_in_between_detaches_comment() {
        let tokens = tokenize("<?php\n\n/**\n * @file\n */\n\n/**\n * Foo.\n */\n$x = 1;\nfunction foo() {}\n");
        assert_eq!(
            locate(&tokens, function_ptr(&tokens)),
            Located::Rejected(Rejection::Missing)
        );
    }

    #[test]
    fn file_header_is_not_a_function_comment() {
        let tokens = tokenize("<?php\n/**\n * Foo.\n */\nfunction foo() {}\n");
        assert_eq!(
            locate(&tokens, function_ptr(&tokens)),
            Located::Rejected(Rejection::Missing)
        );
    }

    #[test]
    fn later_open_tag_segment_may_document_a_function() {
        let tokens = tokenize("<?php\n$a = 1;\n?>\n<p>x</p>\n<?php\n/**\n * Foo.\n */\nfunction foo() {}\n");
        assert!(matches!(
            locate(&tokens, function_ptr(&tokens)),
            Located::Comment(_)
        ));
    }
}
