//! Runtime errors and control-flow signals.
//!
//! A runtime error aborts the script. [`EvalErrorKind`] says what went
//! wrong and maps onto the language-level categories (`NameError`,
//! `TypeError`, ...) via [`EvalErrorKind::category`]. The constructor
//! functions at the bottom of this module are the usual way to build one.
//!
//! `return`, `break` and `continue` are not errors. They travel through the
//! same `Result` channel as [`ControlFlow`] signals inside an [`Unwind`] and
//! are caught by the enclosing call or loop.

use std::fmt;

use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::Span;
use thiserror::Error;

use crate::Value;

/// Language-level error category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    Name,
    Type,
    Arity,
    Range,
    Arithmetic,
    StackOverflow,
    BudgetExceeded,
    Unsupported,
    Host,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "NameError",
            Self::Type => "TypeError",
            Self::Arity => "ArityError",
            Self::Range => "RangeError",
            Self::Arithmetic => "ArithmeticError",
            Self::StackOverflow => "StackOverflow",
            Self::BudgetExceeded => "BudgetExceeded",
            Self::Unsupported => "Unsupported",
            Self::Host => "HostError",
        }
    }

    pub const fn code(self) -> ErrorCode {
        match self {
            Self::Name => ErrorCode::E3001,
            Self::Type => ErrorCode::E3002,
            Self::Arity => ErrorCode::E3003,
            Self::Range => ErrorCode::E3004,
            Self::Arithmetic => ErrorCode::E3005,
            Self::StackOverflow => ErrorCode::E3006,
            Self::BudgetExceeded => ErrorCode::E3007,
            Self::Unsupported => ErrorCode::E3008,
            Self::Host => ErrorCode::E3009,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong at runtime.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalErrorKind {
    // Names
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },
    #[error("`{name}` is already defined in this scope")]
    AlreadyDefined { name: String },

    // Types
    #[error("unsupported operand types for `{op}`: {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("bad operand type for unary `{op}`: {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },
    #[error("{context} must be a bool, found {got}")]
    ExpectedBool {
        context: &'static str,
        got: &'static str,
    },
    #[error("cannot iterate over {got}")]
    NotIterable { got: &'static str },
    #[error("{got} is not callable")]
    NotCallable { got: &'static str },
    #[error("cannot index into {got}")]
    NotIndexable { got: &'static str },
    #[error("cannot access a member of {got}")]
    NotAnObject { got: &'static str },
    #[error("`{function}`: {message}")]
    InvalidArgument { function: String, message: String },

    // Calls
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    // Indexing
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("index must be an integer, found {index}")]
    NonIntegerIndex { index: f64 },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,

    // Resources
    #[error("maximum call depth of {limit} exceeded")]
    StackOverflow { limit: usize },
    #[error("step budget of {budget} exhausted")]
    BudgetExceeded { budget: u64 },

    #[error("{message}")]
    Unsupported { message: String },
    #[error("`{function}` failed: {message}")]
    Host { function: String, message: String },
}

impl EvalErrorKind {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. } | Self::AlreadyDefined { .. } => ErrorCategory::Name,
            Self::BinaryTypeMismatch { .. }
            | Self::UnaryTypeMismatch { .. }
            | Self::ExpectedBool { .. }
            | Self::NotIterable { .. }
            | Self::NotCallable { .. }
            | Self::NotIndexable { .. }
            | Self::NotAnObject { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::Type,
            Self::ArityMismatch { .. } => ErrorCategory::Arity,
            Self::IndexOutOfRange { .. } | Self::NonIntegerIndex { .. } => ErrorCategory::Range,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCategory::Arithmetic,
            Self::StackOverflow { .. } => ErrorCategory::StackOverflow,
            Self::BudgetExceeded { .. } => ErrorCategory::BudgetExceeded,
            Self::Unsupported { .. } => ErrorCategory::Unsupported,
            Self::Host { .. } => ErrorCategory::Host,
        }
    }
}

/// One script function frame the error unwound through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Span of the call expression.
    pub span: Span,
}

/// Script-level call stack at the point of failure, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn push(&mut self, name: &str, span: Span) {
        self.frames.push(BacktraceFrame {
            name: name.to_owned(),
            span,
        });
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at {}", frame.name, frame.span)?;
        }
        Ok(())
    }
}

/// A runtime error with the span of the node that failed.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    pub backtrace: EvalBacktrace,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            backtrace: EvalBacktrace::default(),
        }
    }

    /// Failure raised by a native function.
    pub fn host(function: &str, message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::Host {
            function: function.to_owned(),
            message: message.into(),
        })
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub const fn code(&self) -> ErrorCode {
        self.kind.category().code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.to_string());
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.category().as_str());
        }
        for frame in self.backtrace.frames() {
            diag = diag.with_secondary_label(frame.span, format!("in call to `{}`", frame.name));
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.kind)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Non-local exits.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlFlow {
    Return(Value),
    Break,
    Continue,
}

/// Error channel of the evaluator: a real error or a control-flow signal
/// on its way to the construct that handles it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Unwind {
    Error(EvalError),
    Flow(ControlFlow),
}

impl Unwind {
    /// Attach `span` to an error that has none. Signals pass through.
    pub(crate) fn or_span(self, span: Span) -> Self {
        match self {
            Unwind::Error(err) => Unwind::Error(err.or_span(span)),
            flow @ Unwind::Flow(_) => flow,
        }
    }
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Error(err)
    }
}

impl From<EvalErrorKind> for Unwind {
    fn from(kind: EvalErrorKind) -> Self {
        Unwind::Error(EvalError::new(kind))
    }
}

/// Result of running a whole script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script did not parse; nothing was executed.
    #[error("script failed to parse with {} error(s)", .0.len())]
    Parse(Vec<Diagnostic>),
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

impl ScriptError {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ScriptError::Parse(diagnostics) => diagnostics.clone(),
            ScriptError::Runtime(err) => vec![err.to_diagnostic()],
        }
    }

    pub fn as_runtime(&self) -> Option<&EvalError> {
        match self {
            ScriptError::Runtime(err) => Some(err),
            ScriptError::Parse(_) => None,
        }
    }
}

// Constructors

pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    }
    .into()
}

pub fn already_defined(name: &str) -> EvalError {
    EvalErrorKind::AlreadyDefined {
        name: name.to_owned(),
    }
    .into()
}

pub fn binary_type_mismatch(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
    .into()
}

pub fn unary_type_mismatch(op: &'static str, operand: &Value) -> EvalError {
    EvalErrorKind::UnaryTypeMismatch {
        op,
        operand: operand.type_name(),
    }
    .into()
}

pub fn expected_bool(context: &'static str, got: &Value) -> EvalError {
    EvalErrorKind::ExpectedBool {
        context,
        got: got.type_name(),
    }
    .into()
}

pub fn invalid_argument(function: &str, message: impl Into<String>) -> EvalError {
    EvalErrorKind::InvalidArgument {
        function: function.to_owned(),
        message: message.into(),
    }
    .into()
}

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    }
    .into()
}

pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

pub fn modulo_by_zero() -> EvalError {
    EvalErrorKind::ModuloByZero.into()
}

pub fn unsupported(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Unsupported {
        message: message.into(),
    }
    .into()
}
