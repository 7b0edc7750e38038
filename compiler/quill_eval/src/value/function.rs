//! Callable values.

use std::fmt;
use std::rc::Rc;

use quill_ir::{ExprId, Name, SharedArena};

use crate::{Environment, EvalError, Value};

/// Signature of a host callable.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, EvalError>;

/// A function defined by a script.
///
/// `body` indexes into `arena`, the arena of the script that defined the
/// function, which need not be the arena currently being evaluated.
pub struct ScriptFunction {
    pub name: Rc<str>,
    pub params: Rc<[Name]>,
    pub body: ExprId,
    pub arena: SharedArena,
    /// Scope the function was defined in.
    pub closure: Environment,
}

impl ScriptFunction {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A host callable with a display name.
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        NativeFunction {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// Either a script function or a native one, never both.
pub enum FunctionValue {
    Script(ScriptFunction),
    Native(NativeFunction),
}

impl FunctionValue {
    pub fn name(&self) -> &str {
        match self {
            FunctionValue::Script(f) => &f.name,
            FunctionValue::Native(f) => f.name(),
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Script(s) => write!(f, "ScriptFunction({}/{})", s.name, s.arity()),
            FunctionValue::Native(n) => n.fmt(f),
        }
    }
}
