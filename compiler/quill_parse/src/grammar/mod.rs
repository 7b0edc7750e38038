//! Grammar productions.
//!
//! - `mod.rs`: statement sequences and bodies
//! - `expr.rs`: the Pratt loop, prefix and postfix operators
//! - `primary.rs`: literals, grouping, arrays and the simple keyword forms
//! - `control.rs`: `if`, `while`, `for`, `function`, `on`, `switch`

mod control;
mod expr;
mod primary;

use quill_diagnostic::ErrorCode;
use quill_ir::{ExprId, ExprKind, ExprRange, Span, TokenKind};
use smallvec::SmallVec;

use crate::recovery::BODY_END;
use crate::{ParseError, Parser};

type StmtList = SmallVec<[ExprId; 8]>;

impl Parser<'_> {
    /// Top-level statements. A stray body terminator (`end`, `else`, ...)
    /// is reported and skipped.
    pub(crate) fn parse_top_level(&mut self) -> ExprRange {
        let mut stmts = StmtList::new();
        loop {
            self.parse_statements_into(&mut stmts);
            if self.cursor.is_at_end() {
                break;
            }
            let stray = self.cursor.advance();
            let err = ParseError::syntax(
                ErrorCode::E1001,
                format!("unexpected `{}` outside of a block", stray.kind),
                &stray,
            );
            stmts.push(self.record(err));
        }
        self.arena.alloc_expr_list(stmts)
    }

    /// Statements up to the next body terminator, as a `Body` node.
    pub(crate) fn parse_body(&mut self) -> ExprId {
        let start = self.cursor.current_span();
        let mut stmts = StmtList::new();
        self.parse_statements_into(&mut stmts);
        let span = if stmts.is_empty() {
            Span::point(start.start)
        } else {
            start.merge(self.cursor.previous_span())
        };
        let list = self.arena.alloc_expr_list(stmts);
        self.alloc(ExprKind::Body(list), span)
    }

    fn parse_statements_into(&mut self, out: &mut StmtList) {
        while !BODY_END.contains(&self.cursor.current_kind()) {
            let before = self.cursor.position();
            let stmt = match self.parse_expr() {
                Ok(id) => id,
                Err(err) => self.recover(err),
            };
            out.push(stmt);
            if self.cursor.position() == before {
                self.cursor.advance();
            }
        }
    }

    /// `end` closing the construct opened at `opener`.
    pub(crate) fn expect_end(&mut self, opener: TokenKind) -> Result<Span, ParseError> {
        self.cursor
            .expect(TokenKind::End)
            .map(|t| t.span)
            .map_err(|err| err.with_hint(format!("add `end` to close this `{opener}`")))
    }
}
