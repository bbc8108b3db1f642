//! Whitespace accounting used by the doc comment spacing rules.
//!
//! The comment parser keeps every whitespace run it walks past as raw
//! text.  Spacing rules never look back at source positions; they count
//! line-end markers and space characters inside those runs instead.
use memchr::memmem;

/// Count the non-overlapping occurrences of `eol` in `text`.
pub fn count_eol(text: &str, eol: &str) -> usize {
    if eol.is_empty() {
        return 0;
    }
    memmem::find_iter(text.as_bytes(), eol.as_bytes()).count()
}

/// Count the plain space characters (`' '`) in `text`.  Tabs do not count.
pub fn count_spaces(text: &str) -> usize {
    memchr::memchr_iter(b' ', text.as_bytes()).count()
}

/// Count how many `eol` markers `text` starts with, back to back.
pub fn leading_eol_count(text: &str, eol: &str) -> usize {
    if eol.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut rest = text;
    while let Some(stripped) = rest.strip_prefix(eol) {
        count += 1;
        rest = stripped;
    }
    count
}

/// Whether `text` is empty or made only of whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_unix_line_ends() {
        assert_eq!(count_eol("", "\n"), 0);
        assert_eq!(count_eol(" ", "\n"), 0);
        assert_eq!(count_eol("\n   ", "\n"), 1);
        assert_eq!(count_eol("\n\n ", "\n"), 2);
    }

    #[test]
    fn counts_windows_line_ends_as_one_marker() {
        assert_eq!(count_eol("\r\n\r\n ", "\r\n"), 2);
        assert_eq!(count_eol("\n\n", "\r\n"), 0);
    }

    #[test]
    fn spaces_ignore_tabs_and_newlines() {
        assert_eq!(count_spaces("\n   "), 3);
        assert_eq!(count_spaces("\t \t"), 1);
        assert_eq!(count_spaces(""), 0);
    }

    #[test]
    fn leading_eols_stop_at_first_other_char() {
        assert_eq!(leading_eol_count(" Foo.", "\n"), 0);
        assert_eq!(leading_eol_count("\n Foo.", "\n"), 1);
        assert_eq!(leading_eol_count("\n\n Foo.\n", "\n"), 2);
        assert_eq!(leading_eol_count("\r\n Foo.", "\r\n"), 1);
    }

    #[test]
    fn empty_marker_never_matches() {
        assert_eq!(count_eol("\n\n", ""), 0);
        assert_eq!(leading_eol_count("\n", ""), 0);
    }
}
