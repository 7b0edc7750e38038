//! Interpreter configuration.

use quill_ir::{SharedArena, SharedInterner};
use quill_stack::DepthGuard;

use super::events::EventRegistry;
use super::{Interpreter, StepBudget};
use crate::module::ModuleResolver;
use crate::natives::install_builtins;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::Environment;

/// Script call depth allowed unless configured otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Builder for [`Interpreter`].
///
/// ```ignore
/// let mut interp = Interpreter::builder()
///     .print_handler(buffer_handler())
///     .step_budget(Some(10_000))
///     .build();
/// ```
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    step_budget: Option<u64>,
    max_call_depth: usize,
    with_builtins: bool,
    resolver: Option<Box<dyn ModuleResolver>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            interner: None,
            print_handler: None,
            step_budget: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            with_builtins: true,
            resolver: None,
        }
    }

    /// Share an interner with code that parses ahead of time.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: impl Into<SharedPrintHandler>) -> Self {
        self.print_handler = Some(handler.into());
        self
    }

    /// Statements and loop iterations one run may execute. `None` is unlimited.
    #[must_use]
    pub fn step_budget(mut self, budget: Option<u64>) -> Self {
        self.step_budget = budget;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Whether to bind `print` and `len`. On by default.
    #[must_use]
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.with_builtins = enabled;
        self
    }

    #[must_use]
    pub fn module_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_default();
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let globals = Environment::new();
        if self.with_builtins {
            install_builtins(&globals, &interner, print_handler.clone());
        }

        Interpreter {
            interner,
            globals,
            print_handler,
            resolver: self.resolver,
            events: EventRegistry::default(),
            budget: StepBudget {
                limit: self.step_budget,
                used: 0,
            },
            depth: DepthGuard::new(self.max_call_depth),
            arena: SharedArena::default(),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
