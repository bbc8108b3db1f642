//! Decomposing the words owned by one comment element into fields.
//!
//! An element is the description block or one tag.  Its words are split
//! into a fixed number of leading single-word fields (a `@param` has a type
//! and a variable name) followed by one free-text field that soaks up the
//! rest.  Every field remembers the exact whitespace run in front of it.

use super::words::is_whitespace;

/// One single-word field and the whitespace before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Field {
    pub whitespace_before: String,
    pub value: String,
}

/// The decomposed words of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Element {
    /// Leading single-word fields; missing ones are empty.
    pub fields: Vec<Field>,
    /// Whitespace before the first word of the free text.
    pub whitespace_before_text: String,
    /// Free text, left-trimmed, interior whitespace preserved.
    pub text: String,
    /// Whitespace trailing the element, up to the next tag.
    pub whitespace_after: String,
}

impl Element {
    /// Decompose `words` into `leading` single-word fields plus free text.
    pub fn split(words: &[&str], leading: usize) -> Self {
        let mut fields: Vec<Field> = Vec::with_capacity(leading);
        let mut whitespace = String::new();
        let mut text = String::new();
        let mut whitespace_before_text: Option<String> = None;

        for word in words {
            if is_whitespace(word) {
                whitespace.push_str(word);
            } else if fields.len() < leading {
                fields.push(Field {
                    whitespace_before: std::mem::take(&mut whitespace),
                    value: (*word).to_string(),
                });
            } else {
                if whitespace_before_text.is_none() {
                    whitespace_before_text = Some(whitespace.clone());
                }
                text.push_str(&whitespace);
                text.push_str(word);
                whitespace.clear();
            }
        }

        fields.resize_with(leading, Field::default);

        Self {
            fields,
            whitespace_before_text: whitespace_before_text.unwrap_or_default(),
            text: text.trim_start().to_string(),
            whitespace_after: whitespace,
        }
    }

    /// Value of leading field `idx` (empty when absent).
    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.value.as_str())
    }

    /// Whitespace before leading field `idx` (empty when absent).
    pub fn whitespace_before(&self, idx: usize) -> &str {
        self.fields
            .get(idx)
            .map_or("", |f| f.whitespace_before.as_str())
    }
}

// ─── Description ────────────────────────────────────────────────────────────

/// Short description, long description and the whitespace separating them,
/// carved out of the words preceding the first tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Descriptions {
    pub short: String,
    pub long: String,
    pub between: String,
}

impl Descriptions {
    pub fn split(words: &[&str], eol: &str) -> Self {
        let short_end = short_end(words, eol);
        let short = match short_end {
            Some(end) => words[..=end].concat(),
            None => String::new(),
        };

        let after_short = short_end.map_or(0, |end| end + 1);
        let Some(long_start) = long_start(words, after_short) else {
            return Self {
                short,
                ..Self::default()
            };
        };

        let between_end = long_start.saturating_sub(1).max(after_short);
        Self {
            short,
            long: words[long_start..].concat().trim_end().to_string(),
            between: words[after_short..between_end].concat(),
        }
    }
}

/// Index of the last word of the short description.
///
/// The short description runs up to the first line end that is directly
/// followed by another line end.  Line ends before any text are part of it.
fn short_end(words: &[&str], eol: &str) -> Option<usize> {
    let mut found_text = false;

    for (pos, word) in words.iter().enumerate() {
        let squeezed: String = word.chars().filter(|c| *c != ' ' && *c != '\t').collect();
        if squeezed != eol {
            found_text = true;
            continue;
        }
        if !found_text {
            continue;
        }
        match words.get(pos + 1) {
            Some(next) if *next == eol => return pos.checked_sub(1),
            Some(_) => {}
            None => return Some(pos),
        }
    }

    words.len().checked_sub(1)
}

/// Index of the first word of the long description, if there is one.
fn long_start(words: &[&str], from: usize) -> Option<usize> {
    if words.is_empty() || from + 1 == words.len() {
        return None;
    }
    let idx = (from..words.len()).find(|&i| !is_whitespace(words[i]))?;
    (!words[idx].starts_with('@')).then_some(idx)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_words_fill_type_name_and_comment() {
        let words = [
            " ", "int", " ", "$x", "\n", "   ", "The", " ", "x.", "\n", "\n", " ",
        ];
        let element = Element::split(&words, 2);
        assert_eq!(element.value(0), "int");
        assert_eq!(element.whitespace_before(0), " ");
        assert_eq!(element.value(1), "$x");
        assert_eq!(element.whitespace_before(1), " ");
        assert_eq!(element.whitespace_before_text, "\n   ");
        assert_eq!(element.text, "The x.");
        assert_eq!(element.whitespace_after, "\n\n ");
    }

    #[test]
    fn missing_fields_are_empty() {
        let element = Element::split(&["\n", "\n"], 2);
        assert_eq!(element.value(0), "");
        assert_eq!(element.value(1), "");
        assert_eq!(element.text, "");
        assert_eq!(element.whitespace_before_text, "");
        assert_eq!(element.whitespace_after, "\n\n");
    }

    #[test]
    fn short_and_long_descriptions() {
        let words = [
            " ", "Does", " ", "X.", "\n", "\n", " ", "Does", " ", "it.", "\n", "\n",
        ];
        let d = Descriptions::split(&words, "\n");
        assert_eq!(d.short, " Does X.");
        assert_eq!(d.between, "\n\n");
        assert_eq!(d.long, "Does it.");
    }

    #[test]
    fn multi_line_short_description() {
        let words = [" ", "Foo", "\n", " ", "bar.", "\n", "\n", " "];
        let d = Descriptions::split(&words, "\n");
        assert_eq!(d.short, " Foo\n bar.");
        assert_eq!(d.long, "");
        assert_eq!(d.between, "");
    }

    #[test]
    fn leading_blank_line_stays_in_short_description() {
        let words = ["\n", " ", "Foo.", "\n", "\n"];
        let d = Descriptions::split(&words, "\n");
        assert_eq!(d.short, "\n Foo.");
    }

    #[test]
    fn missing_blank_line_merges_descriptions() {
        let words = [" ", "Foo.", "\n", " ", "Bar.", "\n", "\n"];
        let d = Descriptions::split(&words, "\n");
        assert_eq!(d.short, " Foo.\n Bar.");
        assert_eq!(d.long, "");
    }
}
