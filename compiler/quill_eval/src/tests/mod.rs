//! Interpreter tests, driven through `Interpreter::interpret`.
//!
//! - `expressions`: operators, assignment, arrays, strings
//! - `control`: conditionals, loops, switch
//! - `functions`: calls, recursion, closures
//! - `host`: globals, objects, modules, events, limits
//! - `runtime_errors`: categories, spans and backtraces

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod control;
mod functions;
mod host;
mod runtime_errors;

use crate::{buffer_handler, EvalError, Interpreter, ScriptError, Value};

/// Interpreter that captures `print` output.
pub(super) fn interp() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

/// Run `source` and return its value, failing the test on any error.
pub(super) fn eval(source: &str) -> Value {
    interp()
        .interpret(source)
        .unwrap_or_else(|err| panic!("{source:?} failed: {err}"))
}

/// Run `source` and return everything it printed.
pub(super) fn output(source: &str) -> String {
    let mut interp = interp();
    if let Err(err) = interp.interpret(source) {
        panic!("{source:?} failed: {err}");
    }
    interp.print_output()
}

/// Run `source`, expecting a runtime error.
pub(super) fn eval_err(source: &str) -> EvalError {
    match interp().interpret(source) {
        Err(ScriptError::Runtime(err)) => err,
        other => panic!("expected a runtime error from {source:?}, got {other:?}"),
    }
}

pub(super) fn num(n: f64) -> Value {
    Value::Number(n)
}
