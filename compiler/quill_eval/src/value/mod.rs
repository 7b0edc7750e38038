//! Runtime values.
//!
//! Numbers, strings, booleans and null are plain values. Arrays, functions
//! and objects are references: cloning a [`Value`] clones the handle, so
//! two holders of the same array observe each other's mutations.

mod function;

pub use function::{FunctionValue, NativeFn, NativeFunction, ScriptFunction};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{Environment, EvalError};

/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

#[derive(Clone)]
pub enum Value {
    Null,
    Number(f64),
    Str(Rc<str>),
    Bool(bool),
    Array(ArrayRef),
    Function(Rc<FunctionValue>),
    /// Property bag backed by its own scope.
    Object(Environment),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Wrap a host callable.
    pub fn native(
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        Value::Function(Rc::new(FunctionValue::Native(NativeFunction::new(
            name, func,
        ))))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Object(_) => "object",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `==` semantics.
    ///
    /// Arrays compare element-wise; functions and objects by identity.
    /// Values of different types are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Render a number the way scripts see it: integral values without a
/// fraction, everything else in shortest round-trip form.
pub fn display_number(n: f64) -> String {
    format!("{n}")
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

/// Arrays already on the rendering path, to cut self-references short.
type Seen = Vec<*const RefCell<Vec<Value>>>;

fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    nested: bool,
    seen: &mut Seen,
) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Number(n) => f.write_str(&display_number(*n)),
        Value::Str(s) if nested => write!(f, "{:?}", &**s),
        Value::Str(s) => f.write_str(s),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Array(items) => {
            let ptr = Rc::as_ptr(items);
            if seen.contains(&ptr) {
                return f.write_str("[...]");
            }
            seen.push(ptr);
            f.write_str("[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, true, seen)?;
            }
            seen.pop();
            f.write_str("]")
        }
        Value::Function(func) => match &**func {
            FunctionValue::Script(s) => write!(f, "<function {}>", s.name),
            FunctionValue::Native(n) => write!(f, "<native {}>", n.name()),
        },
        Value::Object(_) => f.write_str("<object>"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, false, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Array(_) => write!(f, "Array({self})"),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::Object(env) => write!(f, "Object({env:?})"),
        }
    }
}
