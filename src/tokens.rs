//! Token model and read-only cursor over a tokenized PHP file.
//!
//! Sniffs never look at source text directly.  They navigate a
//! [`TokenStream`] with `find_previous` / `find_next` style searches and
//! read per-token metadata (kind, raw content, line, enclosing scopes).

use std::ops::Index;

/// The closed set of token kinds the sniffs care about.
///
/// Anything without a dedicated variant is folded into [`TokenKind::Keyword`]
/// (reserved words) or [`TokenKind::Operator`] (punctuation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,
    Whitespace,
    /// `//`, `#` and `/* */` comments.  Block comments produce one token
    /// per line.
    Comment,
    /// One line of a `/** */` comment.
    DocComment,
    Variable,
    /// An identifier that is not a reserved word in its position.
    String,
    Number,
    ConstantString,
    DoubleQuotedString,
    Heredoc,

    // Declarations
    Class,
    Interface,
    Trait,
    Enum,
    Function,
    Closure,
    Fn,
    Namespace,
    Use,
    Const,

    // Modifiers
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
    Var,

    // Control structures that own a scope
    If,
    ElseIf,
    Else,
    For,
    Foreach,
    While,
    Do,
    Switch,
    Try,
    Catch,
    Finally,

    /// Any other reserved word (`return`, `new`, `echo`, ...).
    Keyword,

    // Operators
    Equal,
    DoubleArrow,
    Plus,
    Minus,
    Inc,
    Dec,
    IsEqual,
    IsNotEqual,
    IsIdentical,
    IsNotIdentical,
    IsSmallerOrEqual,
    IsGreaterOrEqual,
    OpenParenthesis,
    CloseParenthesis,
    OpenCurlyBracket,
    CloseCurlyBracket,
    OpenSquareBracket,
    CloseSquareBracket,
    /// `#[`, closed by a plain `]`.
    AttributeStart,
    Semicolon,
    Comma,
    Ampersand,
    Ellipsis,
    ObjectOperator,
    DoubleColon,
    /// Any other operator or punctuation.
    Operator,
}

impl TokenKind {
    /// Comparison operators that test for (in)equality or ordering-equality.
    pub const EQUALITY: &'static [TokenKind] = &[
        TokenKind::IsEqual,
        TokenKind::IsNotEqual,
        TokenKind::IsIdentical,
        TokenKind::IsNotIdentical,
        TokenKind::IsSmallerOrEqual,
        TokenKind::IsGreaterOrEqual,
    ];

    pub fn is_equality(self) -> bool {
        Self::EQUALITY.contains(&self)
    }

    pub fn is_class_or_interface(self) -> bool {
        matches!(self, TokenKind::Class | TokenKind::Interface)
    }

    /// Tokens that carry no code: whitespace and comments of either style.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }
}

/// A lexically enclosing scope recorded on a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Token index of the scope owner (`class`, `function`, `if`, ...).
    pub owner: usize,
    pub kind: TokenKind,
}

/// One lexical unit of a PHP file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token.
    pub content: String,
    /// 1-based line the token starts on.
    pub line: u32,
    /// Byte offset of the token in the source.
    pub offset: u32,
    /// Enclosing scope owners, outermost first.
    pub conditions: Vec<Condition>,
}

/// An ordered, 0-indexed sequence of tokens with search helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, ptr: usize) -> Option<&Token> {
        self.tokens.get(ptr)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kind of the token at `ptr`, if it exists.
    pub fn kind(&self, ptr: usize) -> Option<TokenKind> {
        self.tokens.get(ptr).map(|t| t.kind)
    }

    /// Raw content of the token at `ptr`, or `""` past either end.
    pub fn content(&self, ptr: usize) -> &str {
        self.tokens.get(ptr).map_or("", |t| t.content.as_str())
    }

    /// Nearest token at or before `start` whose kind is in `kinds`.
    pub fn find_previous(&self, kinds: &[TokenKind], start: usize) -> Option<usize> {
        self.scan_back(start, |k| kinds.contains(&k))
    }

    /// Nearest token at or before `start` whose kind is *not* in `kinds`.
    pub fn find_previous_excluding(&self, kinds: &[TokenKind], start: usize) -> Option<usize> {
        self.scan_back(start, |k| !kinds.contains(&k))
    }

    /// Nearest token at or after `start` whose kind is in `kinds`.
    pub fn find_next(&self, kinds: &[TokenKind], start: usize) -> Option<usize> {
        (start..self.tokens.len()).find(|&i| kinds.contains(&self.tokens[i].kind))
    }

    /// Nearest token at or after `start` whose kind is *not* in `kinds`.
    pub fn find_next_excluding(&self, kinds: &[TokenKind], start: usize) -> Option<usize> {
        (start..self.tokens.len()).find(|&i| !kinds.contains(&self.tokens[i].kind))
    }

    fn scan_back(&self, start: usize, matches: impl Fn(TokenKind) -> bool) -> Option<usize> {
        if self.tokens.is_empty() {
            return None;
        }
        let start = start.min(self.tokens.len() - 1);
        (0..=start).rev().find(|&i| matches(self.tokens[i].kind))
    }

    /// Token index of the name of the declaration opened at `ptr`
    /// (`function`, `class`, `interface`, `trait` or `enum`).
    ///
    /// Skips whitespace, comments and the by-reference `&` of
    /// `function &name()`.
    pub fn declaration_name_ptr(&self, ptr: usize) -> Option<usize> {
        match self.kind(ptr)? {
            TokenKind::Function
            | TokenKind::Class
            | TokenKind::Interface
            | TokenKind::Trait
            | TokenKind::Enum => {}
            _ => return None,
        }
        let next = self.find_next_excluding(
            &[
                TokenKind::Whitespace,
                TokenKind::Comment,
                TokenKind::DocComment,
                TokenKind::Ampersand,
            ],
            ptr + 1,
        )?;
        (self.tokens[next].kind == TokenKind::String).then_some(next)
    }

    /// Name of the declaration opened at `ptr`, e.g. `"__construct"`.
    pub fn declaration_name(&self, ptr: usize) -> Option<&str> {
        self.declaration_name_ptr(ptr)
            .map(|name| self.tokens[name].content.as_str())
    }

    /// The first recorded class or interface scope enclosing `ptr`.
    ///
    /// Conditions are stored outermost first, so for a class nested in a
    /// function body this is still the outer class-like, if any.
    pub fn enclosing_class(&self, ptr: usize) -> Option<usize> {
        self.tokens
            .get(ptr)?
            .conditions
            .iter()
            .find(|c| c.kind.is_class_or_interface())
            .map(|c| c.owner)
    }

    /// Concatenated content of the tokens `start..=end`.
    pub fn content_between(&self, start: usize, end: usize) -> String {
        if start > end || start >= self.tokens.len() {
            return String::new();
        }
        let end = end.min(self.tokens.len() - 1);
        self.tokens[start..=end]
            .iter()
            .map(|t| t.content.as_str())
            .collect()
    }

    /// Source line of `ptr`, clamped to the last token for positions
    /// derived past the end of the stream.
    pub fn line_of(&self, ptr: usize) -> u32 {
        match self.tokens.get(ptr).or_else(|| self.tokens.last()) {
            Some(token) => token.line,
            None => 1,
        }
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, ptr: usize) -> &Token {
        &self.tokens[ptr]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
