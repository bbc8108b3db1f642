//! Short / long description rules and the hook documentation convention.

use std::sync::LazyLock;

use regex::Regex;

use super::FunctionContext;
use crate::docblock::DocComment;
use crate::sniffs::Reporter;
use crate::util::{count_eol, leading_eol_count};

/// A short description that talks about implementing a hook.
static HOOK_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:I|i)mplement[^\n]+?hook_[^\n]+").expect("valid regex"));

/// The expected ending: ` hook_foo().`
static HOOK_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" hook_[\S()]+\.$").expect("valid regex"));

/// `Implements hook_foo().` is the only accepted wording.
pub(super) fn check_hook(ctx: &FunctionContext, comment: &DocComment, reporter: &mut Reporter) {
    let Some(found) = HOOK_MENTION.find(&comment.short_description) else {
        return;
    };
    let mention = found.as_str();
    if !mention.contains("Implements ") || !HOOK_SUFFIX.is_match(mention) {
        reporter.warning(
            "Format should be * Implements hook_foo().",
            ctx.comment_start + 1,
            "HookImplementation",
            Vec::new(),
        );
    }
}

/// No blank line above the short description, exactly one between the
/// short and the long description.
pub(super) fn check_spacing(
    ctx: &FunctionContext,
    comment: &DocComment,
    eol: &str,
    reporter: &mut Reporter,
) {
    let short = &comment.short_description;
    let leading = leading_eol_count(short, eol);
    if !short.is_empty() && leading > 0 {
        let noun = if leading > 1 { "newlines" } else { "newline" };
        reporter.error(
            &format!("Extra {noun} found before function comment short description"),
            ctx.comment_start + 1,
            "SpacingBeforeShort",
            Vec::new(),
        );
    }

    if comment.long_description.is_empty() {
        return;
    }
    let short_lines = count_eol(short, eol) + 1;
    if count_eol(&comment.whitespace_between, eol) != 2 {
        reporter.error(
            "There must be exactly one blank line between descriptions in function comment",
            ctx.comment_start + short_lines + 1,
            "SpacingAfterShort",
            Vec::new(),
        );
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn hook_warnings(short: &str) -> usize {
        let tokens = crate::tokens::TokenStream::default();
        let ctx = FunctionContext::for_tests(0);
        let comment = DocComment::with_short_description(short);
        let mut reporter = Reporter::new("Test", &tokens);
        check_hook(&ctx, &comment, &mut reporter);
        reporter.into_diagnostics().len()
    }

    #[test]
    fn accepts_canonical_hook_wording() {
        assert_eq!(hook_warnings(" Implements hook_menu()."), 0);
        assert_eq!(hook_warnings(" Implements hook_form_FORM_ID_alter()."), 0);
    }

    #[test]
    fn flags_other_hook_wordings() {
        assert_eq!(hook_warnings(" Implementation of hook_menu()."), 1);
        assert_eq!(hook_warnings(" implements hook_menu()."), 1);
        assert_eq!(hook_warnings(" Implements hook_menu()"), 1);
    }

    #[test]
    fn ignores_descriptions_without_a_hook() {
        assert_eq!(hook_warnings(" Implements a cache."), 0);
        assert_eq!(hook_warnings(" Returns hook_menu() data."), 0);
    }
}
