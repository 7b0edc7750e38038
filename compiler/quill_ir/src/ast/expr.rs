//! Expression nodes.
//!
//! Quill is expression-oriented: control-flow constructs, definitions and
//! blocks are all expressions and live in the same arena. Children are
//! referenced by [`ExprId`]; lists by range into the arena's side tables.

use crate::{AssignOp, BinaryOp, CaseRange, ExprId, ExprRange, Name, NameRange, Span, UnaryOp};

/// An expression with its source span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Number literal, stored as `f64::to_bits`.
    Number(u64),
    Str(Name),
    Bool(bool),
    Null,
    Ident(Name),

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `object.member`, where `member` is evaluated against the object's scope.
    Member {
        object: ExprId,
        member: ExprId,
    },
    /// `target op value`. `value` is `None` for `++`/`--`.
    Assign {
        op: AssignOp,
        target: Name,
        value: Option<ExprId>,
    },

    /// `[a, b, c]`
    Array(ExprRange),
    /// `event { params }`, the header of an `on` handler.
    EventLiteral {
        event: ExprId,
        params: NameRange,
    },
    /// Statement sequence. Its value is the last statement's value.
    Body(ExprRange),

    /// `use "path"`
    Use(Name),
    /// `on event { params } body end`. `header` is an `EventLiteral`.
    On {
        header: ExprId,
        body: ExprId,
    },
    Return(Option<ExprId>),
    Break,
    Continue,
    /// `switch subject case v body ... default body end`
    Switch {
        subject: ExprId,
        cases: CaseRange,
        default: Option<ExprId>,
    },
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    While {
        cond: ExprId,
        body: ExprId,
    },
    For {
        binding: Name,
        iter: ExprId,
        body: ExprId,
    },
    Function {
        name: Name,
        params: NameRange,
        body: ExprId,
    },
    Call {
        callee: ExprId,
        args: ExprRange,
    },
    Index {
        receiver: ExprId,
        index: ExprId,
    },

    /// Placeholder left by parser recovery. `error` is the position of its
    /// diagnostic in the parse's error list. Never evaluated.
    Error { error: u32 },
}

impl ExprKind {
    #[inline]
    pub fn number(value: f64) -> Self {
        ExprKind::Number(value.to_bits())
    }

    /// Number value, if this is a number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ExprKind::Number(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

/// One `case value body` arm of a switch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SwitchCase {
    pub value: ExprId,
    pub body: ExprId,
}
