//! Function calls.

use quill_ir::Span;
use tracing::trace;

use super::exec::ExecResult;
use super::Interpreter;
use crate::errors::{already_defined, arity_mismatch, ControlFlow, EvalErrorKind, Unwind};
use crate::{FunctionValue, ScriptFunction, Value};

impl Interpreter {
    /// Call `callee` with evaluated arguments. `span` is the call site,
    /// recorded in the backtrace of errors that escape a script function.
    pub(super) fn call_value(&mut self, callee: &Value, args: Vec<Value>, span: Span) -> ExecResult {
        let Value::Function(func) = callee else {
            return Err(EvalErrorKind::NotCallable {
                got: callee.type_name(),
            }
            .into());
        };
        match &**func {
            FunctionValue::Native(native) => {
                trace!(function = native.name(), args = args.len(), "native call");
                native.call(&args).map_err(Unwind::from)
            }
            FunctionValue::Script(script) => self.call_script(script, args, span),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(function = %script.name))]
    fn call_script(&mut self, script: &ScriptFunction, args: Vec<Value>, span: Span) -> ExecResult {
        if args.len() != script.arity() {
            return Err(arity_mismatch(&script.name, script.arity(), args.len()).into());
        }

        let env = script.closure.child();
        for (&param, arg) in script.params.iter().zip(args) {
            env.define(param, arg)
                .map_err(|_| already_defined(self.interner.lookup(param)))?;
        }

        if let Err(exceeded) = self.depth.enter() {
            return Err(EvalErrorKind::StackOverflow {
                limit: exceeded.limit,
            }
            .into());
        }
        let previous = std::mem::replace(&mut self.arena, script.arena.clone());
        let result = self.eval(script.body, &env);
        self.arena = previous;
        self.depth.exit();

        match result {
            Err(Unwind::Flow(ControlFlow::Return(value))) => Ok(value),
            Err(Unwind::Error(mut err)) => {
                err.backtrace.push(&script.name, span);
                Err(Unwind::Error(err))
            }
            other => other,
        }
    }
}
