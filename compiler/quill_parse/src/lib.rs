//! Pratt parser for Quill.
//!
//! Produces a flat AST in an [`ExprArena`]. Parsing never stops at the
//! first problem: syntax errors are recorded, the parser synchronizes to the
//! next statement or body terminator, and an `Error` node stands in for the
//! broken construct. A [`ParseResult`] with errors must not be executed.

mod context;
mod cursor;
mod error;
mod grammar;
mod recovery;

#[cfg(test)]
mod tests;

pub use context::ParseContext;
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};
pub use recovery::{synchronize, TokenSet};

use context::ContextStack;
use quill_diagnostic::Diagnostic;
use quill_ir::{Expr, ExprArena, ExprId, ExprKind, Program, Span, StringInterner, TokenList};
use recovery::RECOVERY;
use tracing::{debug, trace};

/// Output of a parse: the program, its arena and every diagnostic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub program: Program,
    pub arena: ExprArena,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// `true` iff the parse produced no diagnostics.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All diagnostics, one per line.
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ParseError::to_diagnostic).collect()
    }

    /// Top-level statements in source order.
    pub fn statements(&self) -> &[ExprId] {
        self.arena.get_expr_list(self.program.statements)
    }

    /// Diagnostic behind an `Error` node.
    pub fn error_for(&self, id: ExprId) -> Option<&ParseError> {
        match self.arena.get_expr(id).kind {
            ExprKind::Error { error } => self.errors.get(error as usize),
            _ => None,
        }
    }
}

/// Parse a token list.
pub fn parse(tokens: &TokenList) -> ParseResult {
    Parser::new(tokens).parse_program()
}

/// Lex and parse `source`. Lexer errors are reported ahead of parse errors.
pub fn parse_source(source: &str, interner: &StringInterner) -> ParseResult {
    let lexed = quill_lexer::lex(source, interner);
    let errors = lexed.errors.iter().map(ParseError::from).collect();
    Parser::new(&lexed.tokens)
        .with_errors(errors)
        .parse_program()
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    contexts: ContextStack,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let source_len = tokens
            .as_slice()
            .last()
            .map_or(0, |t| t.span.end as usize);
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::with_capacity(source_len),
            contexts: ContextStack::default(),
            errors: Vec::new(),
        }
    }

    /// Start from diagnostics reported by an earlier stage.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.errors = errors;
        self
    }

    /// Parse the whole token stream.
    pub fn parse_program(mut self) -> ParseResult {
        let statements = self.parse_top_level();
        debug!(
            exprs = self.arena.expr_count(),
            errors = self.errors.len(),
            "parsed program"
        );
        ParseResult {
            program: Program { statements },
            arena: self.arena,
            errors: self.errors,
        }
    }

    #[inline]
    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// Run `f` with `ctx` pushed. The context is popped on every path.
    fn with_context<T>(&mut self, ctx: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        self.contexts.push(ctx);
        let result = f(self);
        self.contexts.pop(ctx);
        result
    }

    /// Record `err` and return the `Error` node that replaces the construct.
    fn record(&mut self, err: ParseError) -> ExprId {
        debug!(code = %err.code, line = err.line, column = err.column, "{}", err.message);
        let error = u32::try_from(self.errors.len()).unwrap_or(u32::MAX);
        let id = self.alloc(ExprKind::Error { error }, err.span);
        self.errors.push(err);
        id
    }

    /// Record a syntax error and skip to the next recovery point.
    fn recover(&mut self, err: ParseError) -> ExprId {
        let id = self.record(err);
        let skipped = synchronize(&mut self.cursor, RECOVERY);
        trace!(
            skipped,
            resume = %self.cursor.current_kind(),
            "synchronized after syntax error"
        );
        id
    }
}
