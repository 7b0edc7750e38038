//! Quill source printer.
//!
//! Renders an AST back to source text. Output re-parses to an equivalent
//! tree: operands are parenthesized only where the binding powers would
//! otherwise regroup them, and string literals are re-escaped.
//!
//! Layout is fixed: one statement per line, bodies indented by
//! [`INDENT_WIDTH`] spaces, `end` on its own line.

pub mod emitter;
mod formatter;


pub use emitter::{Emitter, StringEmitter};
pub use formatter::Formatter;

use quill_ir::{ExprArena, ExprId, Program, StringInterner};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Format a whole program. Empty programs format to the empty string.
pub fn format_program(arena: &ExprArena, program: Program, interner: &StringInterner) -> String {
    let mut formatter = Formatter::new(arena, interner);
    formatter.format_statements(arena.get_expr_list(program.statements));
    formatter.finish()
}

/// Format a single expression without a trailing newline.
pub fn format_expr(arena: &ExprArena, id: ExprId, interner: &StringInterner) -> String {
    let mut formatter = Formatter::new(arena, interner);
    formatter.format_expr(id);
    formatter.into_inner().output()
}
