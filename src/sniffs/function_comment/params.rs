//! `@param` block rules and the cross-reference against the real
//! parameter list.

use tracing::trace;

use super::FunctionContext;
use crate::docblock::{DocComment, ParamTag};
use crate::sniffs::Reporter;
use crate::types::RealParameter;
use crate::util::{count_eol, count_spaces};

/// Whether a `&` in a documented name of a by-reference parameter is
/// reported.  Kept off until the coding standard settles whether the
/// marker is wrong.
const REFERENCE_MARKER_WARNING: bool = false;

/// Column bookkeeping for aligned `@param` blocks.
///
/// Recorded for every tag but not reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParamAlignment {
    space_before_var: usize,
    space_before_comment: usize,
    /// Position of the tag with the longest type.
    longest_type: usize,
    /// Position of the tag with the longest variable name.
    longest_var: usize,
}

impl Default for ParamAlignment {
    fn default() -> Self {
        Self {
            space_before_var: usize::MAX,
            space_before_comment: usize::MAX,
            longest_type: 0,
            longest_var: 0,
        }
    }
}

impl ParamAlignment {
    fn observe(&mut self, param: &ParamTag, error_pos: usize, has_comment: bool) {
        let spaces = count_spaces(&param.whitespace_before_var_name);
        if spaces < self.space_before_var {
            self.space_before_var = spaces;
            self.longest_type = error_pos;
        }

        let spaces = count_spaces(&param.whitespace_before_comment);
        if has_comment && spaces < self.space_before_comment {
            self.space_before_comment = spaces;
            self.longest_var = error_pos;
        }
    }
}

pub(super) fn check(
    ctx: &FunctionContext,
    comment: &DocComment,
    real_params: &[RealParameter],
    eol: &str,
    reporter: &mut Reporter,
) {
    let (Some(first), Some(last)) = (comment.params.first(), comment.params.last()) else {
        return;
    };

    if count_eol(&first.whitespace_before, eol) < 2 {
        reporter.error(
            "There must be an empty line before the parameter block",
            ctx.comment_start + first.line,
            "SpacingBeforeParams",
            Vec::new(),
        );
    }

    if count_eol(&last.whitespace_after, eol) != 2 {
        reporter.error(
            "Last parameter comment requires a blank newline after it",
            ctx.comment_start + last.line,
            "SpacingAfterParams",
            Vec::new(),
        );
    }

    let mut alignment = ParamAlignment::default();
    for param in &comment.params {
        check_param(ctx, param, real_params, eol, &mut alignment, reporter);
    }
    trace!(
        longest_type = alignment.longest_type,
        longest_var = alignment.longest_var,
        "param column bookkeeping"
    );
}

fn check_param(
    ctx: &FunctionContext,
    param: &ParamTag,
    real_params: &[RealParameter],
    eol: &str,
    alignment: &mut ParamAlignment,
    reporter: &mut Reporter,
) {
    let error_pos = ctx.comment_start + param.line;
    let param_comment = param.comment.trim();
    let pos = param.position.to_string();

    if param.whitespace_before_type != " " {
        reporter.error(
            "Expected 1 space before variable type",
            error_pos,
            "SpacingBeforeParamType",
            Vec::new(),
        );
    }

    alignment.observe(param, error_pos, !param_comment.is_empty());

    let param_name = if param.var_name.is_empty() {
        "[ UNKNOWN ]"
    } else {
        param.var_name.as_str()
    };

    match real_params.get(param.position - 1) {
        Some(real) => check_name(param_name, real, &pos, error_pos, reporter),
        None if param_name != "..." => {
            reporter.error(
                "Superfluous doc comment at position %s",
                error_pos,
                "ExtraParamComment",
                vec![pos.clone()],
            );
        }
        None => {}
    }

    if param.var_name.is_empty() {
        reporter.error(
            "Missing parameter name at position %s",
            error_pos,
            "MissingParamName",
            vec![pos.clone()],
        );
    }

    if param.declared_type.is_empty() {
        reporter.error(
            "Missing parameter type at position %s",
            error_pos,
            "MissingParamType",
            vec![pos.clone()],
        );
    }

    if param_comment.is_empty() {
        reporter.error(
            "Missing comment for param \"%s\" at position %s",
            error_pos,
            "MissingParamComment",
            vec![param_name.to_string(), pos],
        );
    } else if count_eol(&param.whitespace_before_comment, eol) != 1 {
        reporter.error(
            "Parameter comment must be on the next line at position %s",
            error_pos,
            "ParamCommentNewLine",
            vec![pos],
        );
    } else if count_spaces(&param.whitespace_before_comment) != 3 {
        reporter.error(
            "Parameter comment indentation must be 2 additional spaces at position %s",
            error_pos + 1,
            "ParamCommentIndentation",
            vec![pos],
        );
    }
}

/// Compare a documented name with the declared one at the same position.
fn check_name(
    param_name: &str,
    real: &RealParameter,
    pos: &str,
    error_pos: usize,
    reporter: &mut Reporter,
) {
    if real.pass_by_reference && param_name.starts_with('&') {
        if REFERENCE_MARKER_WARNING {
            reporter.warning(
                "Doc comment for var %s at position %s should not contain the & for referenced variables.",
                error_pos,
                "ParamReferenceMarker",
                vec![param_name.to_string(), pos.to_string()],
            );
        }
        return;
    }

    if param_name == real.name {
        return;
    }

    let shown_real = if real.pass_by_reference {
        format!("&{}", real.name)
    } else {
        real.name.clone()
    };
    let data = vec![param_name.to_string(), shown_real, pos.to_string()];

    if param_name.to_lowercase() == real.name.to_lowercase() {
        reporter.error(
            "Doc comment for var %s does not match case of actual variable name %s at position %s",
            error_pos,
            "ParamNameNoCaseMatch",
            data,
        );
    } else {
        reporter.error(
            "Doc comment for var %s does not match actual variable name %s at position %s",
            error_pos,
            "ParamNameNoMatch",
            data,
        );
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_tracks_tightest_columns() {
        let wide = ParamTag {
            whitespace_before_var_name: "   ".to_string(),
            whitespace_before_comment: "\n   ".to_string(),
            ..ParamTag::default()
        };
        let tight = ParamTag {
            whitespace_before_var_name: " ".to_string(),
            whitespace_before_comment: "\n   ".to_string(),
            ..ParamTag::default()
        };

        let mut alignment = ParamAlignment::default();
        alignment.observe(&wide, 3, true);
        alignment.observe(&tight, 5, false);

        assert_eq!(alignment.space_before_var, 1);
        assert_eq!(alignment.longest_type, 5);
        assert_eq!(alignment.space_before_comment, 3);
        assert_eq!(alignment.longest_var, 3);
    }
}
