//! Function doc comment parsing.
//!
//! Turns the raw text of a `/** ... */` block into a [`DocComment`]: the
//! short and long descriptions plus the `@param`, `@return`, `@throws` and
//! `@see` tags.  Other tags (`@ingroup`, `@todo`, ...) end the preceding
//! element but are otherwise ignored.
//!
//! The parser is tolerant: almost any text yields a model, and every
//! whitespace run between fields is kept verbatim because the spacing rules
//! are defined in terms of those runs.  It fails only when the text is not
//! a closed doc comment or when the comment carries more than one
//! `@return`.
//!
//! # Submodules
//!
//! - [`words`]: splitting the comment into whitespace / text words and
//!   recognising tag boundaries.
//! - [`elements`]: decomposing the words of one element into fields, and
//!   carving the short and long descriptions out of the description block.

mod elements;
mod words;

use thiserror::Error;

use elements::{Descriptions, Element};

/// Why a comment could not be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Function comment must start with \"/**\"")]
    MissingOpener,
    #[error("Function comment is not closed with \"*/\" (line {line})")]
    Unterminated { line: usize },
    #[error("Only one @{tag} tag is allowed in a function comment")]
    DuplicateTag { tag: &'static str, line: usize },
}

impl ParseError {
    /// Line offset of the failure relative to the first comment line.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingOpener => 0,
            ParseError::Unterminated { line } | ParseError::DuplicateTag { line, .. } => *line,
        }
    }
}

/// A `@param` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamTag {
    /// 1-based ordinal among the parsed `@param` tags.
    pub position: usize,
    pub declared_type: String,
    /// The documented name, `$` included; may carry a stray `&`.
    pub var_name: String,
    pub comment: String,
    /// Whitespace trailing the previous element, i.e. in front of `@param`.
    pub whitespace_before: String,
    pub whitespace_before_type: String,
    pub whitespace_before_var_name: String,
    pub whitespace_before_comment: String,
    /// Whitespace between this tag and the next one (or the comment end).
    pub whitespace_after: String,
    /// Line offset within the comment.
    pub line: usize,
}

/// The `@return` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnTag {
    /// Value, whitespace and comment exactly as written.
    pub raw_value: String,
    /// The type word.
    pub value: String,
    pub comment: String,
    pub whitespace_before_value: String,
    pub whitespace_before_comment: String,
    pub line: usize,
}

/// A `@throws` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrowsTag {
    /// The exception class name.
    pub value: String,
    pub comment: String,
    pub line: usize,
}

/// A `@see` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeeTag {
    pub content: String,
    pub whitespace_before_content: String,
    pub line: usize,
}

/// Structured model of one function doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Text up to the first blank line, leading line ends included.
    pub short_description: String,
    pub long_description: String,
    /// Raw whitespace separating the short and long descriptions.
    pub whitespace_between: String,
    pub params: Vec<ParamTag>,
    pub return_tag: Option<ReturnTag>,
    pub throws: Vec<ThrowsTag>,
    pub sees: Vec<SeeTag>,
    has_content: bool,
}

impl DocComment {
    /// A comment with nothing but whitespace between its delimiters.
    pub fn is_empty(&self) -> bool {
        !self.has_content
    }

    /// A non-empty comment holding only `short` as its short description.
    #[cfg(test)]
    pub(crate) fn with_short_description(short: &str) -> Self {
        Self {
            short_description: short.to_string(),
            has_content: true,
            ..Self::default()
        }
    }
}

/// Parse the raw text of a doc comment, lines separated by `eol`.
pub fn parse(text: &str, eol: &str) -> Result<DocComment, ParseError> {
    let trimmed = text.trim();
    if !trimmed.starts_with("/**") {
        return Err(ParseError::MissingOpener);
    }
    if trimmed.len() < 5 || !trimmed.ends_with("*/") {
        let line = crate::util::count_eol(text.trim_end(), eol);
        return Err(ParseError::Unterminated { line });
    }

    let words = words::split(text, eol);
    let mut comment = DocComment {
        has_content: words.iter().any(|w| !words::is_whitespace(w)),
        ..DocComment::default()
    };
    if comment.is_empty() {
        return Ok(comment);
    }

    let tags: Vec<usize> = (0..words.len())
        .filter(|&pos| words::is_tag_at(&words, pos, eol))
        .collect();

    // The description owns everything between the first word and the
    // first tag.
    let description_end = tags.first().copied().unwrap_or(words.len());
    let description = words.get(1..description_end).unwrap_or(&[]);
    let descriptions = Descriptions::split(description, eol);
    comment.short_description = descriptions.short;
    comment.long_description = descriptions.long;
    comment.whitespace_between = descriptions.between;

    let mut previous_after = Element::split(description, 1).whitespace_after;

    for (i, &tag_pos) in tags.iter().enumerate() {
        let end = tags.get(i + 1).copied().unwrap_or(words.len());
        let owned = &words[tag_pos + 1..end];
        let line = words[..tag_pos].iter().filter(|w| **w == eol).count();

        let element = match &words[tag_pos][1..] {
            "param" => {
                let element = Element::split(owned, 2);
                comment.params.push(ParamTag {
                    position: comment.params.len() + 1,
                    declared_type: element.value(0).to_string(),
                    var_name: element.value(1).to_string(),
                    comment: element.text.clone(),
                    whitespace_before: previous_after,
                    whitespace_before_type: element.whitespace_before(0).to_string(),
                    whitespace_before_var_name: element.whitespace_before(1).to_string(),
                    whitespace_before_comment: element.whitespace_before_text.clone(),
                    whitespace_after: element.whitespace_after.clone(),
                    line,
                });
                element
            }
            "return" => {
                if comment.return_tag.is_some() {
                    return Err(ParseError::DuplicateTag {
                        tag: "return",
                        line,
                    });
                }
                let element = Element::split(owned, 1);
                let value = element.value(0).to_string();
                comment.return_tag = Some(ReturnTag {
                    raw_value: format!("{}{}{}", value, element.whitespace_before_text, element.text),
                    value,
                    comment: element.text.clone(),
                    whitespace_before_value: element.whitespace_before(0).to_string(),
                    whitespace_before_comment: element.whitespace_before_text.clone(),
                    line,
                });
                element
            }
            "throws" => {
                let element = Element::split(owned, 1);
                comment.throws.push(ThrowsTag {
                    value: element.value(0).to_string(),
                    comment: element.text.clone(),
                    line,
                });
                element
            }
            "see" => {
                let element = Element::split(owned, 0);
                comment.sees.push(SeeTag {
                    content: element.text.clone(),
                    whitespace_before_content: element.whitespace_before_text.clone(),
                    line,
                });
                element
            }
            _ => Element::split(owned, 0),
        };

        previous_after = element.whitespace_after;
    }

    Ok(comment)
}
