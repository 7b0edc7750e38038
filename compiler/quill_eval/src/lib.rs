//! Quill Eval - tree-walking interpreter for Quill scripts.
//!
//! # Architecture
//!
//! - `Interpreter`: owns the global scope, the `on` handler registry and the
//!   per-run limits; walks the arena produced by `quill_parse`
//! - `Environment`: reference-counted scope chain shared by closures and
//!   objects
//! - `evaluate_binary` / `evaluate_unary`: operator semantics on evaluated
//!   operands
//! - `ObjectBuilder` and `NativeFunction`: the host-binding surface
//! - `ModuleResolver`: host hook behind `use "path"`
//!
//! Values are `Rc`-based, so an interpreter stays on the thread that made it.
//!
//! ```ignore
//! let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
//! interp.interpret("function add(a, b) return a + b end print(add(2, 3))")?;
//! assert_eq!(interp.print_output(), "5\n");
//! ```

mod environment;
pub mod errors;
mod interpreter;
mod module;
mod natives;
mod operators;
mod print_handler;
mod value;

#[cfg(test)]
mod tests;

pub use environment::{EnvError, Environment, LocalScope, Scope};
pub use errors::{
    BacktraceFrame, ControlFlow, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind,
    ScriptError,
};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use module::{module_binding_name, ModuleResolver};
pub use natives::{check_arity, len_native, print_native, ObjectBuilder};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{
    display_number, ArrayRef, FunctionValue, NativeFn, NativeFunction, ScriptFunction, Value,
};
