use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{eval, eval_err, interp, num, output};
use crate::{ErrorCategory, Value};

#[test]
fn test_call_and_return() {
    assert_eq!(eval("function add(a, b) return a + b end add(2, 3)"), num(5.0));
    assert_eq!(
        output("function add(a, b) return a + b end print(add(2, 3))"),
        "5\n"
    );
}

#[test]
fn test_body_value_without_return() {
    assert_eq!(eval("function f() 1 2 end f()"), num(2.0));
    assert_eq!(eval("function f() return end f()"), Value::Null);
}

#[test]
fn test_definition_evaluates_to_null() {
    assert_eq!(eval("function f() end"), Value::Null);
}

#[test]
fn test_recursion() {
    let source = "function fib(n)
            if n < 2 return n end
            return fib(n - 1) + fib(n - 2)
        end
        fib(15)";
    assert_eq!(eval(source), num(610.0));
}

#[test]
fn test_deep_recursion_within_limit() {
    let source = "function depth(n)
            if n == 0 return 0 end
            return depth(n - 1) + 1
        end
        depth(400)";
    assert_eq!(eval(source), num(400.0));
}

#[test]
fn test_functions_are_values() {
    let source = "function twice(f, x) return f(f(x)) end
        function inc(n) return n + 1 end
        twice(inc, 5)";
    assert_eq!(eval(source), num(7.0));
}

#[test]
fn test_closure_keeps_its_scope_alive() {
    let source = "function counter()
            count = 0
            function next()
                count += 1
                return count
            end
            return next
        end
        c = counter()
        c() c()
        c()";
    assert_eq!(eval(source), num(3.0));
}

#[test]
fn test_closures_capture_each_loop_iteration() {
    let kept = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&kept);
    let mut interp = interp();
    interp.define_global(
        "keep",
        Value::native("keep", move |args| {
            sink.borrow_mut().extend(args.iter().cloned());
            Ok(Value::Null)
        }),
    );
    interp
        .interpret("for i in [1, 2, 3] function get() return i end keep(get) end")
        .unwrap();

    let getters = kept.borrow().clone();
    let results: Vec<Value> = getters
        .iter()
        .map(|get| interp.call(get, Vec::new()).unwrap())
        .collect();
    assert_eq!(results, vec![num(1.0), num(2.0), num(3.0)]);
}

#[test]
fn test_params_shadow_globals() {
    assert_eq!(eval("x = 1 function f(x) x = 5 return x end f(2) x"), num(1.0));
}

#[test]
fn test_assignment_in_function_updates_enclosing_binding() {
    assert_eq!(eval("x = 1 function f() x = 5 end f() x"), num(5.0));
}

#[test]
fn test_new_names_in_function_stay_local() {
    let err = eval_err("function f() fresh = 1 end f() fresh");
    assert_eq!(err.category(), ErrorCategory::Name);
}

#[test]
fn test_arity_is_exact() {
    let err = eval_err("function add(a, b) return a + b end add(1)");
    assert_eq!(err.category(), ErrorCategory::Arity);
    assert_eq!(
        err.to_string(),
        "ArityError: `add` expects 2 argument(s), got 1"
    );
    let err = eval_err("function f() end f(1)");
    assert_eq!(err.category(), ErrorCategory::Arity);
}

#[test]
fn test_redefinition_in_same_scope_is_an_error() {
    let err = eval_err("function f() end function f() end");
    assert_eq!(err.category(), ErrorCategory::Name);
}

#[test]
fn test_calling_a_non_function() {
    let err = eval_err("x = 1 x()");
    assert_eq!(err.to_string(), "TypeError: number is not callable");
}

#[test]
fn test_return_inside_loop_leaves_function() {
    let source = "function find(items, wanted)
            for item in items
                if item == wanted return true end
            end
            return false
        end
        found = [find([1, 2, 3], 2), find([1], 5)]";
    assert_eq!(
        eval(source),
        Value::array(vec![Value::Bool(true), Value::Bool(false)])
    );
}
