//! AST node types.

mod expr;
mod operators;

pub use expr::{Expr, ExprKind, SwitchCase};
pub use operators::{AssignOp, BinaryOp, UnaryOp, MEMBER_BINDING_POWER};

use crate::ExprRange;

/// A parsed script: its top-level statements in source order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Program {
    pub statements: ExprRange,
}
