//! Host hook behind `use "path"`.
//!
//! The evaluator never touches the file system. A host that wants modules
//! installs a [`ModuleResolver`]; without one, `use` fails at runtime.

use std::path::Path;

use crate::{EvalError, Value};

/// Turns the path of a `use` into a value.
pub trait ModuleResolver {
    fn resolve(&self, path: &str) -> Result<Value, EvalError>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str) -> Result<Value, EvalError>,
{
    fn resolve(&self, path: &str) -> Result<Value, EvalError> {
        self(path)
    }
}

/// Name a module's object is bound under: the path's file stem.
///
/// `"lib/math.ql"` binds `math`. Paths without a usable stem bind nothing.
pub fn module_binding_name(path: &str) -> Option<&str> {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
}
