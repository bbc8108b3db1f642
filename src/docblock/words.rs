//! Splitting a raw doc comment into words.
//!
//! A *word* is either a run of non-whitespace characters or a run of
//! whitespace.  Each comment line contributes its words followed by one
//! line-end word, so whitespace runs that straddle lines stay separate
//! (`"\n"` then `"   "`) and the spacing rules can count them.

/// Split `text` into words.
///
/// Each line is trimmed, blank lines are dropped, and the comment framing
/// (`/**`, `*/`, a leading `*`) is removed before splitting.
pub(super) fn split<'a>(text: &'a str, eol: &'a str) -> Vec<&'a str> {
    let mut words = Vec::new();

    for line in text.split(eol) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let line = if let Some(rest) = line.strip_prefix("/**") {
            rest.strip_suffix("*/").unwrap_or(rest)
        } else if let Some(rest) = line.strip_suffix("*/") {
            rest
        } else if let Some(rest) = line.strip_prefix('*') {
            rest
        } else {
            line
        };

        push_runs(line, &mut words);
        words.push(eol);
    }

    words
}

/// Push the alternating whitespace / non-whitespace runs of `line`.
fn push_runs<'a>(line: &'a str, words: &mut Vec<&'a str>) {
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, ch) in line.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                words.push(&line[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }

    if start < line.len() {
        words.push(&line[start..]);
    }
}

/// Whether the word at `pos` opens a tag.
///
/// A real tag starts with `@`, follows a whitespace word, and that
/// whitespace follows a line end.  `@` in the middle of prose is text.
pub(super) fn is_tag_at(words: &[&str], pos: usize, eol: &str) -> bool {
    if !words[pos].starts_with('@') || pos < 2 {
        return false;
    }
    is_whitespace(words[pos - 1]) && words[pos - 2] == eol
}

pub(super) fn is_whitespace(word: &str) -> bool {
    word.trim().is_empty()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
