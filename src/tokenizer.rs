//! PHP source to [`TokenStream`].
//!
//! The sniffs are written against a token stream with a few specific
//! properties, so this lexer produces exactly that shape rather than the
//! AST `mago_syntax` builds:
//!
//! - every line of a `/** */` (or `/* */`) comment is its own token and keeps
//!   its trailing line end, so `comment_start + n` addresses line `n` of a
//!   doc comment;
//! - whitespace runs are tokens of their own;
//! - the open tag swallows one trailing newline;
//! - every token records the scope owners (`class`, `function`, `if`, ...)
//!   that lexically enclose it, outermost first.
//!
//! Strings, heredocs and nowdocs are opaque single tokens.  The lexer never
//! fails; unterminated constructs run to the end of the input.

use memchr::memmem;

use crate::tokens::{Condition, Token, TokenKind, TokenStream};

/// Tokenize a PHP file.
pub fn tokenize(source: &str) -> TokenStream {
    Lexer::new(source).run()
}

// ─── Lexer ──────────────────────────────────────────────────────────────────

struct Lexer<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: u32,
    in_php: bool,
    tokens: Vec<Token>,
    /// One entry per open `{`; `None` for braces without a scope owner.
    scopes: Vec<Option<Condition>>,
    /// Scope owners waiting for their `{`, with the parenthesis depth they
    /// were seen at.
    pending: Vec<(Condition, usize)>,
    paren_depth: usize,
    /// The next word is a name (after `function`, `class`, `->`, `::`, ...)
    /// and must not be classified as a keyword.
    expect_name: bool,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            in_php: false,
            tokens: Vec::new(),
            scopes: Vec::new(),
            pending: Vec::new(),
            paren_depth: 0,
            expect_name: false,
        }
    }

    fn run(mut self) -> TokenStream {
        while self.pos < self.bytes.len() {
            if self.in_php {
                self.lex_php();
            } else {
                self.lex_inline_html();
            }
        }
        TokenStream::new(self.tokens)
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    // ─── Outside PHP ────────────────────────────────────────────────────

    fn lex_inline_html(&mut self) {
        let rest = self.rest();
        let found = memmem::find_iter(rest.as_bytes(), b"<?")
            .find_map(|idx| open_tag_len(&rest[idx..]).map(|(kind, len)| (idx, kind, len)));

        match found {
            Some((idx, kind, len)) => {
                if idx > 0 {
                    self.push(TokenKind::InlineHtml, idx);
                }
                self.push(kind, len);
                self.in_php = true;
            }
            None => self.push(TokenKind::InlineHtml, rest.len()),
        }
    }

    // ─── Inside PHP ─────────────────────────────────────────────────────

    fn lex_php(&mut self) {
        let c = self.bytes[self.pos];
        match c {
            c if is_space(c) => {
                let len = self.span_while(|b| is_space(b));
                self.push(TokenKind::Whitespace, len);
            }
            b'?' if self.peek(1) == Some(b'>') => {
                let mut len = 2;
                if self.rest()[2..].starts_with("\r\n") {
                    len += 2;
                } else if self.peek(2) == Some(b'\n') {
                    len += 1;
                }
                self.push(TokenKind::CloseTag, len);
                self.in_php = false;
            }
            b'/' if self.peek(1) == Some(b'*') => self.lex_block_comment(),
            b'/' if self.peek(1) == Some(b'/') => self.lex_line_comment(),
            b'#' if self.peek(1) == Some(b'[') => self.push(TokenKind::AttributeStart, 2),
            b'#' => self.lex_line_comment(),
            b'$' if self.peek(1).is_some_and(is_ident_start) => {
                let len = 1 + self.span_from(1, is_ident_char);
                self.push(TokenKind::Variable, len);
            }
            b'\\' if self.peek(1).is_some_and(is_ident_start) => self.lex_word(),
            c if is_ident_start(c) => self.lex_word(),
            c if c.is_ascii_digit() => self.lex_number(),
            b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => self.lex_number(),
            b'\'' => self.lex_quoted(b'\'', TokenKind::ConstantString),
            b'"' => self.lex_quoted(b'"', TokenKind::DoubleQuotedString),
            b'`' => self.lex_quoted(b'`', TokenKind::DoubleQuotedString),
            b'<' if self.rest().starts_with("<<<") => {
                if !self.lex_heredoc() {
                    self.lex_operator();
                }
            }
            _ => self.lex_operator(),
        }
    }

    fn lex_block_comment(&mut self) {
        let is_doc = self.peek(2) == Some(b'*') && self.peek(3).is_some_and(is_space);
        let kind = if is_doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };

        let rest = self.rest();
        let len = match memmem::find(&rest.as_bytes()[2..], b"*/") {
            Some(idx) => idx + 4,
            None => rest.len(),
        };

        // One token per line, each keeping its line end.
        let comment = &rest[..len];
        for piece in comment.split_inclusive('\n') {
            self.push(kind, piece.len());
        }
    }

    fn lex_line_comment(&mut self) {
        let rest = self.rest();
        let mut len = rest.find('\n').unwrap_or(rest.len());
        if let Some(close) = rest[..len].find("?>") {
            len = close;
        }
        let line = &rest[..len];
        let len = line.strip_suffix('\r').map_or(len, str::len);
        self.push(TokenKind::Comment, len);
    }

    fn lex_word(&mut self) {
        let len = 1 + self.span_from(1, |b| is_ident_char(b) || b == b'\\');
        let word = &self.rest()[..len];
        let kind = self.classify_word(word, len);
        self.push(kind, len);
    }

    fn classify_word(&self, word: &str, len: usize) -> TokenKind {
        if self.expect_name {
            return TokenKind::String;
        }

        let lower = word.to_ascii_lowercase();
        if matches!(lower.as_str(), "function" | "const")
            && self.previous_significant() == Some(TokenKind::Use)
        {
            return TokenKind::Keyword;
        }

        match lower.as_str() {
            "function" => {
                let after = &self.bytes[self.pos + len..];
                let next = after.iter().find(|&&b| !is_space(b) && b != b'&');
                if next == Some(&b'(') {
                    TokenKind::Closure
                } else {
                    TokenKind::Function
                }
            }
            "enum" => {
                let after = &self.bytes[self.pos + len..];
                let ws = after.iter().take_while(|&&b| is_space(b)).count();
                if ws > 0 && after.get(ws).copied().is_some_and(is_ident_start) {
                    TokenKind::Enum
                } else {
                    TokenKind::String
                }
            }
            "fn" => TokenKind::Fn,
            "class" => TokenKind::Class,
            "interface" => TokenKind::Interface,
            "trait" => TokenKind::Trait,
            "namespace" => TokenKind::Namespace,
            "use" => TokenKind::Use,
            "const" => TokenKind::Const,
            "public" => TokenKind::Public,
            "protected" => TokenKind::Protected,
            "private" => TokenKind::Private,
            "static" => TokenKind::Static,
            "abstract" => TokenKind::Abstract,
            "final" => TokenKind::Final,
            "var" => TokenKind::Var,
            "if" => TokenKind::If,
            "elseif" => TokenKind::ElseIf,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "foreach" => TokenKind::Foreach,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "switch" => TokenKind::Switch,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "finally" => TokenKind::Finally,
            other if RESERVED.contains(&other) => TokenKind::Keyword,
            _ => TokenKind::String,
        }
    }

    fn lex_number(&mut self) {
        let len = self.span_while(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
        self.push(TokenKind::Number, len);
    }

    fn lex_quoted(&mut self, quote: u8, kind: TokenKind) {
        let mut i = self.pos + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == quote => {
                    i += 1;
                    break;
                }
                _ => i += 1,
            }
        }
        let len = i.min(self.bytes.len()) - self.pos;
        self.push(kind, len);
    }

    /// Heredoc / nowdoc.  Returns `false` when `<<<` is not followed by a
    /// label, leaving the input for the operator lexer.
    fn lex_heredoc(&mut self) -> bool {
        let rest = self.rest();
        let header = rest[3..].trim_start_matches([' ', '\t']);
        let header = header.trim_start_matches(['"', '\'']);
        let label_len = header
            .bytes()
            .take_while(|&b| is_ident_char(b))
            .count();
        if label_len == 0 || header.as_bytes()[0].is_ascii_digit() {
            return false;
        }
        let label = &header[..label_len];

        let Some(body_start) = rest.find('\n').map(|i| i + 1) else {
            self.push(TokenKind::Heredoc, rest.len());
            return true;
        };

        let mut offset = body_start;
        let mut end = rest.len();
        for line in rest[body_start..].split_inclusive('\n') {
            let trimmed = line.trim_start_matches([' ', '\t']);
            if let Some(after) = trimmed.strip_prefix(label)
                && !after.bytes().next().is_some_and(is_ident_char)
            {
                end = offset + (line.len() - after.len());
                break;
            }
            offset += line.len();
        }

        self.push(TokenKind::Heredoc, end);
        true
    }

    fn lex_operator(&mut self) {
        let rest = self.rest();
        let op = OPERATORS
            .iter()
            .find(|op| rest.starts_with(**op))
            .copied()
            .unwrap_or_else(|| {
                let width = rest.chars().next().map_or(1, char::len_utf8);
                &rest[..width]
            });
        let kind = operator_kind(op);
        self.push(kind, op.len());
    }

    // ─── Emission & scope tracking ──────────────────────────────────────

    fn push(&mut self, kind: TokenKind, len: usize) {
        if len == 0 {
            return;
        }
        let content = &self.src[self.pos..self.pos + len];

        if kind == TokenKind::CloseCurlyBracket {
            self.scopes.pop();
        }

        let index = self.tokens.len();
        self.tokens.push(Token {
            kind,
            content: content.to_string(),
            line: self.line,
            offset: self.pos as u32,
            conditions: self.scopes.iter().flatten().copied().collect(),
        });

        self.track_scope(kind, index);

        if !kind.is_trivia() && kind != TokenKind::Ampersand {
            self.expect_name = matches!(
                kind,
                TokenKind::Function
                    | TokenKind::Class
                    | TokenKind::Interface
                    | TokenKind::Trait
                    | TokenKind::Enum
                    | TokenKind::Const
                    | TokenKind::ObjectOperator
                    | TokenKind::DoubleColon
            );
        }

        self.line += content.bytes().filter(|&b| b == b'\n').count() as u32;
        self.pos += len;
    }

    fn track_scope(&mut self, kind: TokenKind, index: usize) {
        match kind {
            TokenKind::OpenParenthesis => self.paren_depth += 1,
            TokenKind::CloseParenthesis => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
            }
            TokenKind::Semicolon => {
                let depth = self.paren_depth;
                self.pending.retain(|(_, d)| *d < depth);
            }
            TokenKind::OpenCurlyBracket => {
                let depth = self.paren_depth;
                let owner = self
                    .pending
                    .iter()
                    .rposition(|(_, d)| *d == depth)
                    .and_then(|i| self.pending.drain(i..).next())
                    .map(|(condition, _)| condition);
                self.scopes.push(owner);
            }
            TokenKind::Class
            | TokenKind::Interface
            | TokenKind::Trait
            | TokenKind::Enum
            | TokenKind::Function
            | TokenKind::Closure
            | TokenKind::Namespace
            | TokenKind::If
            | TokenKind::ElseIf
            | TokenKind::Else
            | TokenKind::For
            | TokenKind::Foreach
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::Switch
            | TokenKind::Try
            | TokenKind::Catch
            | TokenKind::Finally => {
                self.pending
                    .push((Condition { owner: index, kind }, self.paren_depth));
            }
            _ => {}
        }
    }

    fn previous_significant(&self) -> Option<TokenKind> {
        self.tokens
            .iter()
            .rev()
            .map(|t| t.kind)
            .find(|k| !k.is_trivia())
    }

    fn span_while(&self, pred: impl Fn(u8) -> bool) -> usize {
        self.span_from(0, pred)
    }

    fn span_from(&self, skip: usize, pred: impl Fn(u8) -> bool) -> usize {
        self.bytes[self.pos + skip..]
            .iter()
            .take_while(|&&b| pred(b))
            .count()
    }
}

// ─── Character classes & tables ─────────────────────────────────────────────

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Length of the open tag at the start of `text`, if there is one.
fn open_tag_len(text: &str) -> Option<(TokenKind, usize)> {
    if text.starts_with("<?=") {
        return Some((TokenKind::OpenTagWithEcho, 3));
    }
    let bytes = text.as_bytes();
    if bytes.len() >= 5 && bytes[2..5].eq_ignore_ascii_case(b"php") {
        let after = &text[5..];
        if after.starts_with("\r\n") {
            return Some((TokenKind::OpenTag, 7));
        }
        return match after.bytes().next() {
            None => Some((TokenKind::OpenTag, 5)),
            Some(b) if is_space(b) => Some((TokenKind::OpenTag, 6)),
            Some(_) => None,
        };
    }
    None
}

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    "===", "!==", "**=", "...", "<=>", "??=", "?->", "<<=", ">>=", "==", "!=", "<>", "<=",
    ">=", "=>", "->", "::", "++", "--", "+=", "-=", "*=", "/=", ".=", "%=", "&=", "|=", "^=",
    "&&", "||", "??", "<<", ">>", "**",
];

fn operator_kind(op: &str) -> TokenKind {
    match op {
        "=" => TokenKind::Equal,
        "=>" => TokenKind::DoubleArrow,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "++" => TokenKind::Inc,
        "--" => TokenKind::Dec,
        "==" => TokenKind::IsEqual,
        "!=" | "<>" => TokenKind::IsNotEqual,
        "===" => TokenKind::IsIdentical,
        "!==" => TokenKind::IsNotIdentical,
        "<=" => TokenKind::IsSmallerOrEqual,
        ">=" => TokenKind::IsGreaterOrEqual,
        "(" => TokenKind::OpenParenthesis,
        ")" => TokenKind::CloseParenthesis,
        "{" => TokenKind::OpenCurlyBracket,
        "}" => TokenKind::CloseCurlyBracket,
        "[" => TokenKind::OpenSquareBracket,
        "]" => TokenKind::CloseSquareBracket,
        ";" => TokenKind::Semicolon,
        "," => TokenKind::Comma,
        "&" => TokenKind::Ampersand,
        "..." => TokenKind::Ellipsis,
        "->" | "?->" => TokenKind::ObjectOperator,
        "::" => TokenKind::DoubleColon,
        _ => TokenKind::Operator,
    }
}

/// Reserved words without a dedicated [`TokenKind`].
const RESERVED: &[&str] = &[
    "and", "array", "as", "break", "callable", "case", "clone", "continue", "declare",
    "default", "die", "echo", "empty", "enddeclare", "endfor", "endforeach", "endif",
    "endswitch", "endwhile", "eval", "exit", "extends", "global", "goto", "implements",
    "include", "include_once", "instanceof", "insteadof", "isset", "list", "match", "new",
    "or", "print", "readonly", "require", "require_once", "return", "throw", "unset", "xor",
    "yield",
];

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn open_tag_swallows_one_newline() {
        let tokens = tokenize("<?php\n\n$a;");
        assert_eq!(tokens[0].kind, TokenKind::OpenTag);
        assert_eq!(tokens[0].content, "<?php\n");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].content, "\n");
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn inline_html_before_open_tag() {
        assert_eq!(
            kinds("<html><?php echo 1; ?>\n</html>"),
            vec![
                TokenKind::InlineHtml,
                TokenKind::OpenTag,
                TokenKind::Keyword,
                TokenKind::Whitespace,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Whitespace,
                TokenKind::CloseTag,
                TokenKind::InlineHtml,
            ]
        );
    }

    #[test]
    fn multi_char_operators_win() {
        assert_eq!(
            kinds("<?php $a === $b;"),
            vec![
                TokenKind::OpenTag,
                TokenKind::Variable,
                TokenKind::Whitespace,
                TokenKind::IsIdentical,
                TokenKind::Whitespace,
                TokenKind::Variable,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn line_comment_stops_before_newline() {
        let tokens = tokenize("<?php // note\r\n$a;");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].content, "// note");
        assert_eq!(tokens[2].content, "\r\n");
    }

    #[test]
    fn empty_block_comment_is_not_a_doc_comment() {
        let tokens = tokenize("<?php /**/ $a;");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].content, "/**/");
    }

    #[test]
    fn heredoc_is_one_token() {
        let src = "<?php $a = <<<EOT\nfunction x() {}\nEOT;\n";
        let tokens = tokenize(src);
        let heredoc = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Heredoc)
            .expect("heredoc token");
        assert_eq!(heredoc.content, "<<<EOT\nfunction x() {}\nEOT");
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Function));
    }

    #[test]
    fn strings_hide_braces() {
        let tokens = tokenize("<?php class A { function f() { return \"{$x}\"; } }");
        let close = tokens
            .iter()
            .rev()
            .find(|t| t.kind == TokenKind::CloseCurlyBracket)
            .expect("closing brace");
        assert!(close.conditions.is_empty());
    }
}
