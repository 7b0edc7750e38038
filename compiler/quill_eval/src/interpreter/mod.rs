//! Tree-walking interpreter.
//!
//! # Arena threading
//!
//! Every script function carries the [`SharedArena`] of the script that
//! defined it, because an `ExprId` is only meaningful in its own arena. The
//! interpreter keeps the arena it is currently walking in `self.arena` and
//! swaps in the callee's arena for the duration of a call. This lets a host
//! run several scripts against one interpreter and later call, or `emit`
//! to, functions and handlers from any of them.
//!
//! - `exec`: per-node evaluation
//! - `call`: function calls and the call-depth guard
//! - `events`: the `on` handler registry

mod builder;
mod call;
mod events;
mod exec;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use quill_ir::{SharedArena, SharedInterner, StringInterner};
use quill_parse::ParseResult;
use quill_stack::DepthGuard;
use tracing::{debug, warn};

use crate::errors::{unsupported, ControlFlow, EvalErrorKind, Unwind};
use crate::module::ModuleResolver;
use crate::print_handler::SharedPrintHandler;
use crate::{Environment, EvalError, ObjectBuilder, ScriptError, Value};
use events::EventRegistry;

/// Statement budget for one run.
#[derive(Clone, Debug)]
struct StepBudget {
    limit: Option<u64>,
    used: u64,
}

impl StepBudget {
    fn tick(&mut self) -> Result<(), EvalError> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                return Err(EvalErrorKind::BudgetExceeded { budget: limit }.into());
            }
            self.used += 1;
        }
        Ok(())
    }
}

/// Runs Quill scripts against a persistent global scope.
///
/// Not `Send`: scopes and reference values are `Rc`-based.
pub struct Interpreter {
    interner: SharedInterner,
    globals: Environment,
    print_handler: SharedPrintHandler,
    resolver: Option<Box<dyn ModuleResolver>>,
    events: EventRegistry,
    budget: StepBudget,
    depth: DepthGuard,
    /// Arena of the code currently being evaluated.
    arena: SharedArena,
}

impl Interpreter {
    /// Interpreter with builtins, stdout printing and no step budget.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Handle to the interner, for parsing ahead of [`eval_program`](Self::eval_program).
    pub fn shared_interner(&self) -> SharedInterner {
        self.interner.clone()
    }

    /// Start an object value whose property names scripts can see.
    pub fn object(&self) -> ObjectBuilder<'_> {
        ObjectBuilder::new(&self.interner)
    }

    /// Bind `name` in the global scope, replacing any existing binding.
    pub fn define_global(&mut self, name: &str, value: impl Into<Value>) {
        self.globals.assign(self.interner.intern(name), value.into());
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.get(self.interner.intern(name))
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Everything printed so far, if the print handler captures output.
    pub fn print_output(&self) -> String {
        self.print_handler.get_output()
    }

    /// Number of registered `on` handlers.
    pub fn handler_count(&self) -> usize {
        self.events.len()
    }

    /// Parse and run `source` in the global scope.
    ///
    /// A script with any parse diagnostic is not executed.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn interpret(&mut self, source: &str) -> Result<Value, ScriptError> {
        let parsed = quill_parse::parse_source(source, &self.interner);
        self.eval_program(&parsed)
    }

    /// Run an already parsed program. Names in `parsed` must come from this
    /// interpreter's interner.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_program(&mut self, parsed: &ParseResult) -> Result<Value, ScriptError> {
        if !parsed.ok() {
            warn!(
                errors = parsed.errors.len(),
                "script has parse errors, not executing"
            );
            return Err(ScriptError::Parse(parsed.diagnostics()));
        }

        self.begin_run();
        let arena = SharedArena::new(parsed.arena.clone());
        let previous = std::mem::replace(&mut self.arena, arena);
        let globals = self.globals.clone();
        let result = self.eval_statements(parsed.program.statements, &globals);
        self.arena = previous;

        let value = result.map_err(escape)?;
        debug!(result = %value, "script finished");
        Ok(value)
    }

    /// Call a function value from the host.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn call(&mut self, func: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
        self.begin_run();
        self.call_value(func, args, quill_ir::Span::DUMMY)
            .map_err(escape)
    }

    /// Run every handler registered for `event`, in registration order.
    #[tracing::instrument(level = "debug", skip_all, fields(event = %event))]
    pub fn emit(&mut self, event: &Value, args: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        self.begin_run();
        let handlers = self.events.handlers_for(event);
        debug!(handlers = handlers.len(), "emitting event");
        let mut results = Vec::with_capacity(handlers.len());
        for handler in handlers {
            let value = self
                .call_value(&handler, args.clone(), quill_ir::Span::DUMMY)
                .map_err(escape)?;
            results.push(value);
        }
        Ok(results)
    }

    fn begin_run(&mut self) {
        self.budget.used = 0;
        self.depth.reset();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Interpreter {
    /// Functions defined at top level capture the global scope, which holds
    /// them in turn. Clearing the bindings breaks that cycle.
    fn drop(&mut self) {
        self.events.clear();
        self.globals.clear();
    }
}

/// Turn whatever reached the top of a run into its final form. Control flow
/// only gets here from hand-built trees the parser would have rejected.
fn escape(unwind: Unwind) -> EvalError {
    match unwind {
        Unwind::Error(err) => err,
        Unwind::Flow(ControlFlow::Return(_)) => unsupported("`return` outside of a function"),
        Unwind::Flow(ControlFlow::Break) => unsupported("`break` outside of a loop"),
        Unwind::Flow(ControlFlow::Continue) => unsupported("`continue` outside of a loop"),
    }
}
