//! Keyword-led constructs closed by `end`.
//!
//! Headers (conditions, subjects, case values, signatures) recover locally:
//! on error the parser synchronizes and still parses the body, so the
//! construct's own `end` is consumed by the construct and not reported as
//! stray.

use quill_ir::{ExprId, ExprKind, Name, NameRange, SwitchCase, TokenKind};
use smallvec::SmallVec;

use crate::{ParseContext, ParseError, Parser};

impl Parser<'_> {
    fn parse_header(&mut self) -> ExprId {
        match self.parse_expr() {
            Ok(id) => id,
            Err(err) => self.recover(err),
        }
    }

    /// Parse the part between a keyword and its body. On failure the error
    /// is recorded and the `Error` node returned, so the caller can still
    /// parse the body and consume its `end`.
    fn parse_signature<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ExprId> {
        f(self).map_err(|err| self.recover(err))
    }

    /// `if c ... [elif c ... | else if c ...]* [else ...] end`
    ///
    /// One `end` closes the whole chain.
    pub(crate) fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let (cond, then_branch, else_branch) =
            self.with_context(ParseContext::Conditional, Self::parse_if_arms)?;
        let end = self.expect_end(TokenKind::If)?;
        Ok(self.alloc(
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            },
            start.merge(end),
        ))
    }

    /// Condition, then-body and the rest of the chain, after `if`/`elif`.
    fn parse_if_arms(&mut self) -> Result<(ExprId, ExprId, Option<ExprId>), ParseError> {
        let cond = self.parse_header();
        let then_branch = self.parse_body();

        let else_branch = match self.cursor.current_kind() {
            TokenKind::Elif => Some(self.parse_else_if()?),
            TokenKind::Else if self.cursor.peek_kind() == TokenKind::If => {
                self.cursor.advance();
                Some(self.parse_else_if()?)
            }
            TokenKind::Else => {
                self.cursor.advance();
                Some(self.parse_body())
            }
            _ => None,
        };

        Ok((cond, then_branch, else_branch))
    }

    /// A nested `If` for an `elif`/`else if` arm. Consumes the keyword but
    /// not the shared `end`.
    fn parse_else_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let (cond, then_branch, else_branch) = self.parse_if_arms()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// `while cond ... end`
    pub(crate) fn parse_while(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let cond = self.parse_header();
        let body = self.with_context(ParseContext::Loop, Self::parse_body);
        let end = self.expect_end(TokenKind::While)?;
        Ok(self.alloc(ExprKind::While { cond, body }, start.merge(end)))
    }

    /// `for name in iterable ... end`
    pub(crate) fn parse_for(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let header = self.parse_signature(|p| {
            let binding = p.cursor.expect_ident()?;
            p.cursor.expect(TokenKind::In)?;
            Ok((binding, p.parse_expr()?))
        });
        let body = self.with_context(ParseContext::Loop, Self::parse_body);
        let end = self.expect_end(TokenKind::For)?;
        Ok(match header {
            Ok((binding, iter)) => self.alloc(
                ExprKind::For {
                    binding,
                    iter,
                    body,
                },
                start.merge(end),
            ),
            Err(error) => error,
        })
    }

    /// `function name(params) ... end`
    pub(crate) fn parse_function(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let signature = self.parse_signature(|p| {
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(TokenKind::LParen)?;
            Ok((name, p.parse_params(TokenKind::RParen)?))
        });
        let body = self.with_context(ParseContext::Function, Self::parse_body);
        let end = self.expect_end(TokenKind::Function)?;
        Ok(match signature {
            Ok((name, params)) => {
                self.alloc(ExprKind::Function { name, params, body }, start.merge(end))
            }
            Err(error) => error,
        })
    }

    /// `on event { params } ... end`
    ///
    /// The `event { params }` header becomes an `EventLiteral` node. The
    /// handler body is parsed as a function body.
    pub(crate) fn parse_on(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let header = self.parse_signature(|p| {
            let event = p.parse_expr()?;
            p.cursor.expect(TokenKind::LBrace)?;
            let params = p.parse_params(TokenKind::RBrace)?;
            let span = p.span_of(event).merge(p.cursor.previous_span());
            Ok(p.alloc(ExprKind::EventLiteral { event, params }, span))
        });
        let body = self.with_context(ParseContext::Function, Self::parse_body);
        let end = self.expect_end(TokenKind::On)?;
        Ok(match header {
            Ok(header) => self.alloc(ExprKind::On { header, body }, start.merge(end)),
            Err(error) => error,
        })
    }

    /// `switch subject [case value ...]* [default ...] end`
    pub(crate) fn parse_switch(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let subject = self.parse_header();

        let mut cases: SmallVec<[SwitchCase; 4]> = SmallVec::new();
        while self.cursor.eat(TokenKind::Case) {
            let value = self.parse_header();
            let body = self.with_context(ParseContext::Switch, Self::parse_body);
            cases.push(SwitchCase { value, body });
        }
        let default = if self.cursor.eat(TokenKind::Default) {
            Some(self.with_context(ParseContext::Switch, Self::parse_body))
        } else {
            None
        };

        let end = self.expect_end(TokenKind::Switch)?;
        let cases = self.arena.alloc_cases(cases);
        Ok(self.alloc(
            ExprKind::Switch {
                subject,
                cases,
                default,
            },
            start.merge(end),
        ))
    }

    /// Comma-separated identifiers up to `close`, which is consumed.
    fn parse_params(&mut self, close: TokenKind) -> Result<NameRange, ParseError> {
        let mut params: SmallVec<[Name; 4]> = SmallVec::new();
        while !self.cursor.check(close) {
            params.push(self.cursor.expect_ident()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(self.arena.alloc_names(params))
    }
}
