//! Lexer for Quill using logos.
//!
//! Produces [`Token`]s with byte spans and 1-based line/column positions.
//! Identifiers and string literals are interned. Whitespace and `#` comments
//! are skipped.
//!
//! Scanning never fails outright: unrecognized characters become
//! [`TokenKind::Unknown`] tokens for the parser to report, and an
//! unterminated string yields a string token plus a [`LexError`].
//!
//! A `-` is always its own token. Negative literals are formed by the parser,
//! so `a -5` is a subtraction.

mod cook_escape;
mod lex_error;
mod position;
mod raw_token;

#[cfg(test)]
mod tests;

use logos::Logos;
use quill_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use tracing::debug;

pub use lex_error::{LexError, LexErrorKind};

use cook_escape::cook_string;
use position::LineTracker;
use raw_token::RawToken;

/// Output of a full lexing pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex a complete source string.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    Lexer::new(source, interner).tokenize()
}

/// On-demand lexer over one source string.
pub struct Lexer<'src, 'i> {
    source: &'src str,
    interner: &'i StringInterner,
    raw: logos::Lexer<'src, RawToken>,
    position: LineTracker,
    errors: Vec<LexError>,
}

#[inline]
fn offset(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl<'src, 'i> Lexer<'src, 'i> {
    pub fn new(source: &'src str, interner: &'i StringInterner) -> Self {
        Lexer {
            source,
            interner,
            raw: RawToken::lexer(source),
            position: LineTracker::default(),
            errors: Vec::new(),
        }
    }

    /// Scan the next token. Returns `Eof` once input is exhausted, and keeps
    /// returning it on further calls.
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.raw.next() else {
            let end = offset(self.source.len());
            return self.make_token(TokenKind::Eof, Span::point(end));
        };

        let range = self.raw.span();
        let span = Span::new(offset(range.start), offset(range.end));
        let slice = self.raw.slice();

        let kind = match result {
            Ok(raw) => self.convert(raw, slice, span),
            Err(()) => TokenKind::Unknown(slice.chars().next().unwrap_or('\0')),
        };
        self.make_token(kind, span)
    }

    /// Scan the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> LexOutput {
        let mut tokens = TokenList::with_capacity(self.source.len() / 3 + 1);
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        debug!(
            tokens = tokens.len(),
            errors = self.errors.len(),
            "lexed source"
        );
        LexOutput {
            tokens,
            errors: self.errors,
        }
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    fn make_token(&mut self, kind: TokenKind, span: Span) -> Token {
        let (line, column) = self.line_col(span);
        Token::new(kind, span, line, column)
    }

    fn line_col(&mut self, span: Span) -> (u32, u32) {
        self.position.advance_to(self.source, span.start as usize)
    }

    fn convert(&mut self, raw: RawToken, slice: &str, span: Span) -> TokenKind {
        match raw {
            RawToken::Number(value) => TokenKind::number(value),
            RawToken::Str => self.intern_string(&slice[1..slice.len() - 1]),
            RawToken::UnterminatedStr => {
                let quote = slice.chars().next().unwrap_or('"');
                let (line, column) = self.line_col(span);
                self.errors.push(LexError {
                    kind: LexErrorKind::UnterminatedString { quote },
                    span,
                    line,
                    column,
                });
                self.intern_string(&slice[1..])
            }
            RawToken::Ident => TokenKind::Ident(self.interner.intern(slice)),

            RawToken::Use => TokenKind::Use,
            RawToken::For => TokenKind::For,
            RawToken::In => TokenKind::In,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::Elif => TokenKind::Elif,
            RawToken::End => TokenKind::End,
            RawToken::Function => TokenKind::Function,
            RawToken::While => TokenKind::While,
            RawToken::Continue => TokenKind::Continue,
            RawToken::Break => TokenKind::Break,
            RawToken::Return => TokenKind::Return,
            RawToken::Switch => TokenKind::Switch,
            RawToken::Case => TokenKind::Case,
            RawToken::Default => TokenKind::Default,
            RawToken::On => TokenKind::On,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Not => TokenKind::Not,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Null => TokenKind::Null,

            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::StarStar => TokenKind::StarStar,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Shl => TokenKind::Shl,
            RawToken::Shr => TokenKind::Shr,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::PlusPlus => TokenKind::PlusPlus,
            RawToken::MinusMinus => TokenKind::MinusMinus,
            RawToken::Amp => TokenKind::Amp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Question => TokenKind::Question,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
        }
    }

    fn intern_string(&self, body: &str) -> TokenKind {
        let name = match cook_string(body) {
            Some(cooked) => self.interner.intern(&cooked),
            None => self.interner.intern(body),
        };
        TokenKind::Str(name)
    }
}
