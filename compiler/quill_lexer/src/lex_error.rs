//! Lexer errors.

use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::Span;

/// What went wrong while scanning.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// A string literal reached end of input without its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString { quote: char },
}

/// A lexer error with its position.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{line}:{column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => ErrorCode::E0001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self.kind {
            LexErrorKind::UnterminatedString { quote } => Diagnostic::error(self.code())
                .with_message(self.kind.to_string())
                .with_label(
                    Span::new(self.span.start, self.span.start + 1),
                    "string starts here",
                )
                .with_suggestion(format!("add a closing `{quote}`")),
        }
    }
}
