//! `@return`, `@throws` and `@see` rules.

use super::FunctionContext;
use crate::docblock::DocComment;
use crate::sniffs::Reporter;
use crate::util::{count_eol, count_spaces, is_blank};

pub(super) fn check_return(
    ctx: &FunctionContext,
    comment: &DocComment,
    eol: &str,
    reporter: &mut Reporter,
) {
    if ctx.is_special_method() {
        return;
    }
    let Some(ret) = &comment.return_tag else {
        return;
    };

    let error_pos = ctx.comment_start + ret.line;
    if is_blank(&ret.raw_value) {
        reporter.error(
            "@return tag is empty in function comment",
            error_pos,
            "EmptyReturn",
            Vec::new(),
        );
        return;
    }

    let mut text = ret.comment.clone();
    let mut whitespace = ret.whitespace_before_comment.as_str();
    if count_eol(&ret.whitespace_before_value, eol) > 0 {
        reporter.error(
            "Data type of return value is missing",
            error_pos,
            "MissingReturnType",
            Vec::new(),
        );
        // The "type" was the first word of the comment.
        text = format!("{} {}", ret.value, ret.comment);
        whitespace = ret.whitespace_before_value.as_str();
    } else if ret.whitespace_before_value != " " {
        reporter.error(
            "Expected 1 space before return type",
            error_pos,
            "SpacingBeforeReturnType",
            Vec::new(),
        );
    }

    if is_blank(&text) {
        reporter.error(
            "Missing comment for @return statement",
            error_pos,
            "MissingReturnComment",
            Vec::new(),
        );
    } else if count_eol(whitespace, eol) != 1 {
        reporter.error(
            "Return comment must be on the next line",
            error_pos,
            "ReturnCommentNewLine",
            Vec::new(),
        );
    } else if count_spaces(whitespace) != 3 {
        reporter.error(
            "Return comment indentation must be 2 additional spaces",
            error_pos + 1,
            "ParamCommentIndentation",
            Vec::new(),
        );
    }
}

pub(super) fn check_throws(ctx: &FunctionContext, comment: &DocComment, reporter: &mut Reporter) {
    for throws in comment.throws.iter().filter(|t| t.value.is_empty()) {
        reporter.error(
            "@throws tag must contain the exception class name",
            ctx.comment_start + throws.line,
            "EmptyThrows",
            Vec::new(),
        );
    }
}

pub(super) fn check_sees(ctx: &FunctionContext, comment: &DocComment, reporter: &mut Reporter) {
    for see in &comment.sees {
        let error_pos = ctx.comment_start + see.line;
        if see.whitespace_before_content != " " {
            reporter.error(
                "Expected 1 space before see reference",
                error_pos,
                "SpacingBeforeSee",
                Vec::new(),
            );
        }

        if see.content.trim().ends_with(['.', '!', '?']) {
            reporter.error(
                "Trailing punctuation for @see references is not allowed.",
                error_pos,
                "SeePunctuation",
                Vec::new(),
            );
        }
    }
}
