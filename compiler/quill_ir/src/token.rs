//! Tokens produced by the lexer.
//!
//! Literal payloads are stored in interned/bit form so every token is
//! `Copy + Eq + Hash`. Number literals keep their `f64` bits.

use std::fmt;

use crate::{Name, Span};

/// A token with its kind and source position.
///
/// `line` and `column` are 1-based; `column` counts characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind,
            span,
            line,
            column,
        }
    }

    /// Source text this token was scanned from.
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

/// Token kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    /// Number literal, stored as `f64::to_bits`.
    Number(u64),
    /// String literal with escapes already cooked.
    Str(Name),
    Ident(Name),

    // Keywords
    Use,
    For,
    In,
    If,
    Else,
    Elif,
    End,
    Function,
    While,
    Continue,
    Break,
    Return,
    /// `switch` or its alias `match`.
    Switch,
    Case,
    Default,
    On,
    And,
    Or,
    Not,
    True,
    False,
    Null,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    PlusEq,
    MinusEq,
    PercentEq,
    PlusPlus,
    MinusMinus,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Dot,
    Colon,
    Question,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,

    /// A character the lexer does not recognize.
    Unknown(char),
    Eof,
}

impl TokenKind {
    /// Build a number token from its value.
    #[inline]
    pub fn number(value: f64) -> Self {
        TokenKind::Number(value.to_bits())
    }

    /// Human-readable name used in parser diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Unknown(_) => "unknown character",
            TokenKind::Eof => "end of file",
            other => other.symbol().unwrap_or("token"),
        }
    }

    /// Fixed spelling of keyword, operator and delimiter tokens.
    pub fn symbol(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Use => "use",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Elif => "elif",
            TokenKind::End => "end",
            TokenKind::Function => "function",
            TokenKind::While => "while",
            TokenKind::Continue => "continue",
            TokenKind::Break => "break",
            TokenKind::Return => "return",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::On => "on",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::PercentEq => "%=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Number(_)
            | TokenKind::Str(_)
            | TokenKind::Ident(_)
            | TokenKind::Unknown(_)
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Whether this token is a reserved word.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Use
                | TokenKind::For
                | TokenKind::In
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Elif
                | TokenKind::End
                | TokenKind::Function
                | TokenKind::While
                | TokenKind::Continue
                | TokenKind::Break
                | TokenKind::Return
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::On
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Index used by parser token sets. Fits in a `u128` bitset.
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            TokenKind::Number(_) => 0,
            TokenKind::Str(_) => 1,
            TokenKind::Ident(_) => 2,
            TokenKind::Use => 3,
            TokenKind::For => 4,
            TokenKind::In => 5,
            TokenKind::If => 6,
            TokenKind::Else => 7,
            TokenKind::Elif => 8,
            TokenKind::End => 9,
            TokenKind::Function => 10,
            TokenKind::While => 11,
            TokenKind::Continue => 12,
            TokenKind::Break => 13,
            TokenKind::Return => 14,
            TokenKind::Switch => 15,
            TokenKind::Case => 16,
            TokenKind::Default => 17,
            TokenKind::On => 18,
            TokenKind::And => 19,
            TokenKind::Or => 20,
            TokenKind::Not => 21,
            TokenKind::True => 22,
            TokenKind::False => 23,
            TokenKind::Null => 24,
            TokenKind::Plus => 25,
            TokenKind::Minus => 26,
            TokenKind::Star => 27,
            TokenKind::StarStar => 28,
            TokenKind::Slash => 29,
            TokenKind::Percent => 30,
            TokenKind::Eq => 31,
            TokenKind::EqEq => 32,
            TokenKind::NotEq => 33,
            TokenKind::Lt => 34,
            TokenKind::LtEq => 35,
            TokenKind::Gt => 36,
            TokenKind::GtEq => 37,
            TokenKind::Shl => 38,
            TokenKind::Shr => 39,
            TokenKind::PlusEq => 40,
            TokenKind::MinusEq => 41,
            TokenKind::PercentEq => 42,
            TokenKind::PlusPlus => 43,
            TokenKind::MinusMinus => 44,
            TokenKind::Amp => 45,
            TokenKind::Pipe => 46,
            TokenKind::Caret => 47,
            TokenKind::Tilde => 48,
            TokenKind::Dot => 49,
            TokenKind::Colon => 50,
            TokenKind::Question => 51,
            TokenKind::LParen => 52,
            TokenKind::RParen => 53,
            TokenKind::LBrace => 54,
            TokenKind::RBrace => 55,
            TokenKind::LBracket => 56,
            TokenKind::RBracket => 57,
            TokenKind::Comma => 58,
            TokenKind::Unknown(_) => 59,
            TokenKind::Eof => 60,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(bits) => write!(f, "{}", f64::from_bits(*bits)),
            TokenKind::Unknown(c) => write!(f, "{c:?}"),
            other => f.write_str(other.display_name()),
        }
    }
}

/// Ordered token sequence, always terminated by [`TokenKind::Eof`].
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
