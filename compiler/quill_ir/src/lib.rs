//! Quill IR
//!
//! Core data structures shared by every stage of the Quill pipeline:
//! - Spans for source locations
//! - Names for interned identifiers and string literals
//! - Tokens and `TokenList` for lexer output
//! - AST nodes, flattened into an arena and addressed by `ExprId`
//!
//! Nothing here depends on the lexer, parser or evaluator.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod span;
mod token;

pub use arena::{ExprArena, SharedArena};
pub use ast::{
    AssignOp, BinaryOp, Expr, ExprKind, Program, SwitchCase, UnaryOp, MEMBER_BINDING_POWER,
};
pub use expr_id::{CaseRange, ExprId, ExprRange, NameRange};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, Name, Token};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(Name, 4);
    crate::static_assert_size!(Token, 32);
}
