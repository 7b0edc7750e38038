//! The Pratt loop.
//!
//! Binding powers come from the operator enums in `quill_ir`. Member access
//! binds tightest, then `**`, the unary operators, the arithmetic and bitwise
//! ladder, `and`/`or`, and finally the right-associative assignment forms.

use quill_diagnostic::ErrorCode;
use quill_ir::{
    AssignOp, BinaryOp, ExprId, ExprKind, ExprRange, Name, Token, TokenKind, UnaryOp,
    MEMBER_BINDING_POWER,
};
use quill_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::{ParseError, Parser};

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        _ => return None,
    };
    Some(op)
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Eq => Some(AssignOp::Assign),
        TokenKind::PlusEq => Some(AssignOp::AddAssign),
        TokenKind::MinusEq => Some(AssignOp::SubAssign),
        TokenKind::PercentEq => Some(AssignOp::ModAssign),
        _ => None,
    }
}

fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Not => Some(UnaryOp::Not),
        TokenKind::Tilde => Some(UnaryOp::BitNot),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.parse_expr_bp(0)
    }

    /// Parse an expression whose operators all bind at least as tightly as
    /// `min_bp`.
    ///
    /// Uses `ensure_sufficient_stack` so that deeply nested input does not
    /// overflow the native stack.
    fn parse_expr_bp(&mut self, min_bp: u16) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_bp_inner(min_bp))
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u16) -> Result<ExprId, ParseError> {
        let mut left = self.parse_prefix()?;

        loop {
            let kind = self.cursor.current_kind();

            if kind == TokenKind::Dot {
                let (l_bp, r_bp) = MEMBER_BINDING_POWER;
                if l_bp < min_bp {
                    break;
                }
                self.cursor.advance();
                let member = self.parse_expr_bp(r_bp)?;
                let span = self.span_of(left).merge(self.span_of(member));
                left = self.alloc(
                    ExprKind::Member {
                        object: left,
                        member,
                    },
                    span,
                );
                continue;
            }

            if let Some(op) = assign_op(kind) {
                let (l_bp, r_bp) = AssignOp::BINDING_POWER;
                if u16::from(l_bp) < min_bp {
                    break;
                }
                let op_token = self.cursor.advance();
                let target = self.assign_target(left, &op_token)?;
                let value = self.parse_expr_bp(u16::from(r_bp))?;
                let span = self.span_of(left).merge(self.span_of(value));
                left = self.alloc(
                    ExprKind::Assign {
                        op,
                        target,
                        value: Some(value),
                    },
                    span,
                );
                continue;
            }

            let Some(op) = binary_op(kind) else {
                break;
            };
            let (l_bp, r_bp) = op.binding_power();
            if u16::from(l_bp) < min_bp {
                break;
            }
            self.cursor.advance();
            let right = self.parse_expr_bp(u16::from(r_bp))?;
            let span = self.span_of(left).merge(self.span_of(right));
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }

        Ok(left)
    }

    /// Unary operators, then a primary with its postfix operators.
    ///
    /// Unary minus applied directly to a number literal folds into a
    /// negative literal, so `-5` is `Number(-5)` while `a -5` stays a
    /// subtraction.
    fn parse_prefix(&mut self) -> Result<ExprId, ParseError> {
        let Some(op) = unary_op(self.cursor.current_kind()) else {
            let primary = self.parse_primary()?;
            return self.parse_postfix(primary);
        };

        let start = self.cursor.advance().span;
        let operand = self.parse_expr_bp(u16::from(UnaryOp::BINDING_POWER))?;
        let span = start.merge(self.span_of(operand));

        if op == UnaryOp::Neg {
            if let Some(value) = self.arena.get_expr(operand).kind.as_number() {
                return Ok(self.alloc(ExprKind::number(-value), span));
            }
        }
        Ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    /// Calls, indexing and `++`/`--`, in a loop directly after a primary.
    fn parse_postfix(&mut self, mut expr: ExprId) -> Result<ExprId, ParseError> {
        loop {
            match self.cursor.current_kind() {
                TokenKind::LParen => {
                    self.cursor.advance();
                    let args = self.parse_expr_list(TokenKind::RParen)?;
                    let span = self.span_of(expr).merge(self.cursor.previous_span());
                    expr = self.alloc(ExprKind::Call { callee: expr, args }, span);
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    let span = self.span_of(expr).merge(self.cursor.previous_span());
                    expr = self.alloc(
                        ExprKind::Index {
                            receiver: expr,
                            index,
                        },
                        span,
                    );
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.cursor.check(TokenKind::PlusPlus) {
                        AssignOp::Increment
                    } else {
                        AssignOp::Decrement
                    };
                    let op_token = self.cursor.advance();
                    let target = self.assign_target(expr, &op_token)?;
                    let span = self.span_of(expr).merge(op_token.span);
                    expr = self.alloc(
                        ExprKind::Assign {
                            op,
                            target,
                            value: None,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Comma-separated expressions up to `close`, which is consumed.
    /// A trailing comma is allowed.
    pub(crate) fn parse_expr_list(&mut self, close: TokenKind) -> Result<ExprRange, ParseError> {
        let mut items: SmallVec<[ExprId; 8]> = SmallVec::new();
        while !self.cursor.check(close) {
            items.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(self.arena.alloc_expr_list(items))
    }

    /// Assignment targets are bare identifiers.
    fn assign_target(&self, target: ExprId, op_token: &Token) -> Result<Name, ParseError> {
        if let ExprKind::Ident(name) = self.arena.get_expr(target).kind {
            Ok(name)
        } else {
            Err(ParseError::syntax(
                ErrorCode::E1005,
                format!("invalid assignment target for `{}`", op_token.kind),
                op_token,
            )
            .with_hint("only a variable name can be assigned to"))
        }
    }
}
