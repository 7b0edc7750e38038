//! Primary expressions.

use quill_diagnostic::ErrorCode;
use quill_ir::{ExprId, ExprKind, TokenKind};

use crate::recovery::BODY_END;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = *self.cursor.current();
        let literal = match token.kind {
            TokenKind::Number(bits) => Some(ExprKind::Number(bits)),
            TokenKind::Str(name) => Some(ExprKind::Str(name)),
            TokenKind::Ident(name) => Some(ExprKind::Ident(name)),
            TokenKind::True => Some(ExprKind::Bool(true)),
            TokenKind::False => Some(ExprKind::Bool(false)),
            TokenKind::Null => Some(ExprKind::Null),
            _ => None,
        };
        if let Some(kind) = literal {
            self.cursor.advance();
            return Ok(self.alloc(kind, token.span));
        }

        match token.kind {
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let elements = self.parse_expr_list(TokenKind::RBracket)?;
                let span = token.span.merge(self.cursor.previous_span());
                Ok(self.alloc(ExprKind::Array(elements), span))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Function => self.parse_function(),
            TokenKind::On => self.parse_on(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Use => self.parse_use(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break | TokenKind::Continue => Ok(self.parse_loop_exit()),
            TokenKind::Unknown(c) => Err(self.cursor.error(
                ErrorCode::E0002,
                format!("unrecognized character {c:?}"),
            )),
            found => Err(self.cursor.error(
                ErrorCode::E1002,
                format!("expected expression, found {found}"),
            )),
        }
    }

    /// `use "path"`
    fn parse_use(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let TokenKind::Str(path) = self.cursor.current_kind() else {
            return Err(self.cursor.error(
                ErrorCode::E1007,
                format!(
                    "expected string after `use`, found {}",
                    self.cursor.current_kind()
                ),
            ));
        };
        let end = self.cursor.advance().span;
        Ok(self.alloc(ExprKind::Use(path), start.merge(end)))
    }

    /// `return [expr]`. The value is omitted when a body terminator follows.
    fn parse_return(&mut self) -> Result<ExprId, ParseError> {
        let keyword = self.cursor.advance();
        let value = if BODY_END.contains(&self.cursor.current_kind()) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        if !self.contexts.allows_return() {
            let err = ParseError::context(
                ErrorCode::E2001,
                "`return` outside of a function",
                &keyword,
            );
            return Ok(self.record(err));
        }

        let span = match value {
            Some(v) => keyword.span.merge(self.span_of(v)),
            None => keyword.span,
        };
        Ok(self.alloc(ExprKind::Return(value), span))
    }

    /// `break` or `continue`. A misplaced one is a context error; the keyword
    /// is consumed and parsing carries on.
    fn parse_loop_exit(&mut self) -> ExprId {
        let keyword = self.cursor.advance();
        let (kind, code, message) = if keyword.kind == TokenKind::Break {
            (ExprKind::Break, ErrorCode::E2002, "`break` outside of a loop")
        } else {
            (
                ExprKind::Continue,
                ErrorCode::E2003,
                "`continue` outside of a loop",
            )
        };

        if self.contexts.allows_loop_exit() {
            self.alloc(kind, keyword.span)
        } else {
            self.record(ParseError::context(code, message, &keyword))
        }
    }
}
