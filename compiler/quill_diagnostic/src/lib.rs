//! Diagnostics for Quill scripts.
//!
//! Every lexer and parser problem becomes a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//! - optional notes and suggestions
//!
//! [`emitter::TerminalEmitter`] renders them for humans.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
