use std::rc::Rc;

use pretty_assertions::assert_eq;
use quill_ir::SharedInterner;

use super::{interp, num};
use crate::{
    buffer_handler, ErrorCategory, EvalError, Interpreter, ObjectBuilder, ScriptError, Value,
};

fn player(interp: &Interpreter) -> Value {
    interp
        .object()
        .property("health", 100.0)
        .property("name", "hero")
        .function("double", |args| match args {
            [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
            _ => Err(EvalError::host("double", "expected one number")),
        })
        .build()
}

#[test]
fn test_globals_persist_across_runs() {
    let mut interp = interp();
    interp.interpret("x = 1").unwrap();
    assert_eq!(interp.interpret("x + 1").unwrap(), num(2.0));
    assert_eq!(interp.get_global("x"), Some(num(1.0)));
}

#[test]
fn test_functions_outlive_the_script_that_defined_them() {
    let mut interp = interp();
    interp.interpret("function sq(n) return n * n end").unwrap();
    assert_eq!(interp.interpret("y = 2 sq(y + 2)").unwrap(), num(16.0));

    let sq = interp.get_global("sq").unwrap();
    assert_eq!(interp.call(&sq, vec![num(3.0)]), Ok(num(9.0)));
}

#[test]
fn test_define_global_replaces() {
    let mut interp = interp();
    interp.define_global("limit", 3.0);
    interp.define_global("limit", 4.0);
    assert_eq!(interp.interpret("limit * 2").unwrap(), num(8.0));
}

#[test]
fn test_builtins_can_be_disabled() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .with_builtins(false)
        .build();
    let err = interp.interpret("print(1)").unwrap_err();
    assert_eq!(err.as_runtime().unwrap().category(), ErrorCategory::Name);
}

#[test]
fn test_native_errors_surface_as_host_errors() {
    let mut interp = interp();
    interp.define_global(
        "fail",
        Value::native("fail", |_| Err(EvalError::host("fail", "disk on fire"))),
    );
    let err = interp.interpret("fail()").unwrap_err();
    let err = err.as_runtime().unwrap();
    assert_eq!(err.category(), ErrorCategory::Host);
    assert_eq!(err.to_string(), "HostError: `fail` failed: disk on fire");
}

#[test]
fn test_object_members() {
    let mut interp = interp();
    let player = player(&interp);
    interp.define_global("player", player);

    assert_eq!(interp.interpret("player.health").unwrap(), num(100.0));
    assert_eq!(interp.interpret("player.name").unwrap(), Value::from("hero"));
    // Arguments resolve in the caller's scope, not the object's.
    assert_eq!(
        interp.interpret("health = 4 player.double(health)").unwrap(),
        num(8.0)
    );
}

#[test]
fn test_assignment_inside_object_scope() {
    let mut interp = interp();
    let player = player(&interp);
    interp.define_global("player", player);

    interp
        .interpret("player.(health -= 30) player.(shield = 5)")
        .unwrap();
    assert_eq!(interp.interpret("player.health").unwrap(), num(70.0));
    assert_eq!(interp.interpret("player.shield").unwrap(), num(5.0));
}

#[test]
fn test_member_errors() {
    let mut interp = interp();
    let player = player(&interp);
    interp.define_global("player", player);

    let err = interp.interpret("player.mana").unwrap_err();
    assert_eq!(err.as_runtime().unwrap().category(), ErrorCategory::Name);
    let err = interp.interpret("x = 1 x.y").unwrap_err();
    assert_eq!(
        err.as_runtime().unwrap().to_string(),
        "TypeError: cannot access a member of number"
    );
}

#[test]
fn test_use_without_resolver_is_unsupported() {
    let err = interp().interpret("use \"lib/math.ql\"").unwrap_err();
    assert_eq!(
        err.as_runtime().unwrap().category(),
        ErrorCategory::Unsupported
    );
}

#[test]
fn test_use_binds_module_under_file_stem() {
    let interner = SharedInterner::default();
    let module_interner = interner.clone();
    let mut interp = Interpreter::builder()
        .interner(interner)
        .print_handler(buffer_handler())
        .module_resolver(move |path: &str| match path {
            "lib/math.ql" => Ok(ObjectBuilder::new(&module_interner)
                .property("half", 0.5)
                .build()),
            _ => Err(EvalError::host("use", format!("no module {path}"))),
        })
        .build();

    assert_eq!(
        interp.interpret("use \"lib/math.ql\" math.half * 4").unwrap(),
        num(2.0)
    );
    let err = interp.interpret("use \"nope.ql\"").unwrap_err();
    assert_eq!(err.as_runtime().unwrap().category(), ErrorCategory::Host);
}

#[test]
fn test_on_and_emit() {
    let mut interp = interp();
    interp
        .interpret("total = 0 on \"hit\" { dmg } total += dmg end")
        .unwrap();
    assert_eq!(interp.handler_count(), 1);

    interp.emit(&"hit".into(), vec![num(5.0)]).unwrap();
    interp.emit(&"hit".into(), vec![num(7.0)]).unwrap();
    assert_eq!(interp.get_global("total"), Some(num(12.0)));

    assert_eq!(interp.emit(&"miss".into(), vec![num(1.0)]), Ok(Vec::new()));
}

#[test]
fn test_emit_runs_handlers_in_order_and_returns_results() {
    let mut interp = interp();
    interp
        .interpret("on \"ping\" {} \"first\" end on \"ping\" {} return \"second\" end")
        .unwrap();
    assert_eq!(
        interp.emit(&"ping".into(), Vec::new()),
        Ok(vec![Value::from("first"), Value::from("second")])
    );
}

#[test]
fn test_emit_checks_arity() {
    let mut interp = interp();
    interp.interpret("on \"hit\" { a, b } end").unwrap();
    let err = interp.emit(&"hit".into(), vec![num(1.0)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arity);
}

#[test]
fn test_event_expression_is_evaluated_once() {
    let mut interp = interp();
    interp
        .interpret("name = \"open\" on name {} 1 end name = \"close\"")
        .unwrap();
    assert_eq!(interp.emit(&"open".into(), Vec::new()), Ok(vec![num(1.0)]));
    assert_eq!(interp.emit(&"close".into(), Vec::new()), Ok(Vec::new()));
}

#[test]
fn test_step_budget() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .step_budget(Some(100))
        .build();
    let err = interp.interpret("while true end").unwrap_err();
    assert_eq!(
        err.as_runtime().unwrap().category(),
        ErrorCategory::BudgetExceeded
    );

    // Each run gets a fresh budget.
    for _ in 0..3 {
        assert_eq!(
            interp.interpret("i = 0 while i < 10 i++ end i").unwrap(),
            num(10.0)
        );
    }
}

#[test]
fn test_call_depth_limit() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_call_depth(16)
        .build();
    let err = interp
        .interpret("function f(n) return f(n + 1) end f(0)")
        .unwrap_err();
    let err = err.as_runtime().unwrap();
    assert_eq!(err.category(), ErrorCategory::StackOverflow);
    assert_eq!(err.backtrace.frames().len(), 16);
    assert!(err.backtrace.frames().iter().all(|frame| frame.name == "f"));

    // The guard is reset for the next run.
    assert_eq!(
        interp
            .interpret("function g(n) if n == 0 return 0 end return g(n - 1) end g(10)")
            .unwrap(),
        num(0.0)
    );
}

#[test]
fn test_parse_errors_are_not_executed() {
    let mut interp = interp();
    let err = interp.interpret("print(\"side effect\") x = ").unwrap_err();
    assert!(matches!(err, ScriptError::Parse(ref diagnostics) if !diagnostics.is_empty()));
    assert_eq!(interp.print_output(), "");
}

/// A native whose closure holds a clone of `guard`.
fn holder(guard: &Rc<()>) -> Value {
    let held = Rc::clone(guard);
    Value::native("holder", move |_| {
        let _ = &held;
        Ok(Value::Null)
    })
}

#[test]
fn test_drop_breaks_the_global_closure_cycle() {
    let guard = Rc::new(());
    let mut interp = interp();
    interp.define_global("holder", holder(&guard));

    // `f` captures the global scope, which in turn binds `f`.
    interp
        .interpret("function f() return holder() end f()")
        .unwrap();
    assert_eq!(Rc::strong_count(&guard), 2);

    drop(interp);
    assert_eq!(Rc::strong_count(&guard), 1);
}

#[test]
fn test_cycles_inside_function_scopes_are_not_collected() {
    let guard = Rc::new(());
    let mut interp = interp();
    interp.define_global("holder", holder(&guard));

    // `next` captures the scope of its `counter` call, which binds `next`
    // and a local copy of `holder`. Nothing outside that pair refers to the
    // scope once the interpreter is gone, so it leaks.
    interp
        .interpret(
            "function counter()
                local_holder = holder
                count = 0
                function next()
                    count += 1
                    return count
                end
                return next
            end
            c = counter()
            c()",
        )
        .unwrap();

    drop(interp);
    assert_eq!(Rc::strong_count(&guard), 2);
}
