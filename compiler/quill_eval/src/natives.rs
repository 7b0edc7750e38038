//! Host-binding surface: built-in natives and the object builder.

use quill_ir::StringInterner;

use crate::errors::{arity_mismatch, invalid_argument};
use crate::print_handler::SharedPrintHandler;
use crate::{Environment, EvalError, Value};

/// Fail with an arity error unless exactly `expected` arguments were passed.
pub fn check_arity(name: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_mismatch(name, expected, args.len()))
    }
}

/// `print(a, b, ...)`: display renderings joined by spaces, then a newline.
pub fn print_native(handler: SharedPrintHandler) -> Value {
    Value::native("print", move |args| {
        let line = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        handler.println(&line);
        Ok(Value::Null)
    })
}

/// `len(x)`: element count of an array, character count of a string.
pub fn len_native() -> Value {
    Value::native("len", |args| {
        check_arity("len", args, 1)?;
        let len = match &args[0] {
            Value::Array(items) => items.borrow().len(),
            Value::Str(s) => s.chars().count(),
            other => {
                return Err(invalid_argument(
                    "len",
                    format!("expected an array or string, found {}", other.type_name()),
                ))
            }
        };
        #[allow(clippy::cast_precision_loss)]
        let len = len as f64;
        Ok(Value::Number(len))
    })
}

/// Bind `print` and `len` in `globals`. Existing bindings win.
pub(crate) fn install_builtins(
    globals: &Environment,
    interner: &StringInterner,
    handler: SharedPrintHandler,
) {
    for (name, value) in [("print", print_native(handler)), ("len", len_native())] {
        // A host binding of the same name takes precedence.
        let _ = globals.define(interner.intern(name), value);
    }
}

/// Builds an object value from named properties and native methods.
///
/// ```ignore
/// let player = ObjectBuilder::new(interp.interner())
///     .property("health", 100.0)
///     .function("heal", |args| Ok(Value::Null))
///     .build();
/// ```
pub struct ObjectBuilder<'a> {
    interner: &'a StringInterner,
    env: Environment,
}

impl<'a> ObjectBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        ObjectBuilder {
            interner,
            env: Environment::new(),
        }
    }

    /// Add or replace a property.
    #[must_use]
    pub fn property(self, key: &str, value: impl Into<Value>) -> Self {
        self.env.assign(self.interner.intern(key), value.into());
        self
    }

    /// Add or replace a native method.
    #[must_use]
    pub fn function(
        self,
        key: &str,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        let value = Value::native(key, func);
        self.property(key, value)
    }

    pub fn build(self) -> Value {
        Value::Object(self.env)
    }
}
