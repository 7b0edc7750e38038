//! Token cursor.
//!
//! The token list always ends in `Eof`, and the cursor never moves past it,
//! so `current()` is always valid.

use quill_diagnostic::ErrorCode;
use quill_ir::{Name, Span, Token, TokenKind, TokenList};

use crate::error::ParseError;

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

const EOF_TOKEN: Token = Token::new(TokenKind::Eof, Span::DUMMY, 1, 1);

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token and return it. Stays put at `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = *self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expect_error(kind))
        }
    }

    pub fn expect_ident(&mut self) -> Result<Name, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name)
        } else {
            Err(self.error(
                ErrorCode::E1004,
                format!("expected identifier, found {}", self.current_kind()),
            ))
        }
    }

    /// Syntax error at the current token.
    #[cold]
    pub fn error(&self, code: ErrorCode, message: impl Into<String>) -> ParseError {
        ParseError::syntax(code, message, self.current())
    }

    #[cold]
    #[inline(never)]
    fn expect_error(&self, kind: TokenKind) -> ParseError {
        let code = match kind {
            TokenKind::End => ErrorCode::E1006,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => ErrorCode::E1003,
            _ => ErrorCode::E1001,
        };
        self.error(
            code,
            format!("expected `{kind}`, found {}", self.current_kind()),
        )
    }
}
