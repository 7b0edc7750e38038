//! Parse error types.

use std::fmt;

use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::{Span, Token};
use quill_lexer::{LexError, LexErrorKind};

/// Which family a parse error belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Lexical or grammatical error.
    Syntax,
    /// `return`/`break`/`continue` outside a construct that accepts it.
    Context,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Syntax => f.write_str("SyntaxError"),
            ParseErrorKind::Context => f.write_str("ContextError"),
        }
    }
}

/// A parse diagnostic with its source position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub hint: Option<String>,
}

impl ParseError {
    pub fn syntax(code: ErrorCode, message: impl Into<String>, at: &Token) -> Self {
        Self::new(ParseErrorKind::Syntax, code, message, at)
    }

    pub fn context(code: ErrorCode, message: impl Into<String>, at: &Token) -> Self {
        Self::new(ParseErrorKind::Context, code, message, at)
    }

    fn new(kind: ParseErrorKind, code: ErrorCode, message: impl Into<String>, at: &Token) -> Self {
        ParseError {
            kind,
            code,
            message: message.into(),
            span: at.span,
            line: at.line,
            column: at.column,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_context_error(&self) -> bool {
        self.kind == ParseErrorKind::Context
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            ParseErrorKind::Syntax => self.code.description(),
            ParseErrorKind::Context => "not allowed here",
        };
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, label);
        if let Some(hint) = &self.hint {
            diag = diag.with_suggestion(hint);
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}: {}",
            self.kind, self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<&LexError> for ParseError {
    fn from(err: &LexError) -> Self {
        let hint = match err.kind {
            LexErrorKind::UnterminatedString { quote } => format!("add a closing `{quote}`"),
        };
        ParseError {
            kind: ParseErrorKind::Syntax,
            code: err.code(),
            message: err.kind.to_string(),
            span: err.span,
            line: err.line,
            column: err.column,
            hint: Some(hint),
        }
    }
}
