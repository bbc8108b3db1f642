//! Spacing around unary operators.
//!
//! `++` and `--` must hug the variable they modify, and a unary `+` / `-`
//! directly after an assignment or comparison must hug its operand:
//!
//! ```php
//! $i++;        // ok
//! $i ++;       // SpaceBeforeOperator
//! ++ $i;       // SpaceAfterOperator
//! $x = - 1;    // SpaceAfterOperator
//! ```

use crate::tokens::TokenKind;
use crate::types::Diagnostic;

use super::{Reporter, Sniff, SniffFile};

pub const SOURCE: &str = "Drupal.Formatting.SpaceUnaryOperator";

#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceUnaryOperatorSniff;

impl Sniff for SpaceUnaryOperatorSniff {
    fn name(&self) -> &'static str {
        "SpaceUnaryOperator"
    }

    fn source(&self) -> &'static str {
        SOURCE
    }

    fn register(&self) -> &'static [TokenKind] {
        &[
            TokenKind::Dec,
            TokenKind::Inc,
            TokenKind::Minus,
            TokenKind::Plus,
        ]
    }

    fn process(&self, file: &SniffFile<'_>, ptr: usize) -> Vec<Diagnostic> {
        let tokens = file.tokens;
        let mut reporter = Reporter::new(SOURCE, tokens);
        let prev = ptr.checked_sub(1).and_then(|p| tokens.kind(p));
        let next = tokens.kind(ptr + 1);

        match tokens.kind(ptr) {
            Some(TokenKind::Inc | TokenKind::Dec) => {
                // Postfix when the operand ends right before us, or when the
                // statement ends right after.
                let modifies_left = matches!(
                    prev,
                    Some(TokenKind::Variable | TokenKind::CloseSquareBracket | TokenKind::String)
                ) || tokens.content(ptr + 1) == ";";

                if modifies_left && prev == Some(TokenKind::Whitespace) {
                    reporter.error(
                        "There must not be a single space before a unary operator statement",
                        ptr,
                        "SpaceBeforeOperator",
                        Vec::new(),
                    );
                }

                if !modifies_left && !tokens.content(ptr + 1).starts_with('$') {
                    reporter.error(
                        "A unary operator statement must not be followed by a single space",
                        ptr,
                        "SpaceAfterOperator",
                        Vec::new(),
                    );
                }
            }
            Some(TokenKind::Plus | TokenKind::Minus) => {
                let before_operator = ptr.checked_sub(2).and_then(|p| tokens.kind(p));
                let after_assignment = before_operator.is_some_and(|kind| {
                    matches!(kind, TokenKind::Equal | TokenKind::DoubleArrow) || kind.is_equality()
                });

                if prev == Some(TokenKind::Whitespace)
                    && after_assignment
                    && next == Some(TokenKind::Whitespace)
                {
                    reporter.error(
                        "A unary operator statement must not be followed by a single space",
                        ptr,
                        "SpaceAfterOperator",
                        Vec::new(),
                    );
                }
            }
            _ => {}
        }

        reporter.into_diagnostics()
    }
}
