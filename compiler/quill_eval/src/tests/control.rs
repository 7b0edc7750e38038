use pretty_assertions::assert_eq;

use super::{eval, eval_err, num, output};
use crate::{ErrorCategory, Value};

#[test]
fn test_if_chain() {
    let source = |x: u32| {
        format!(
            "x = {x} if x == 1 r = \"one\" elif x == 2 r = \"two\" else r = \"many\" end r"
        )
    };
    assert_eq!(eval(&source(1)), Value::from("one"));
    assert_eq!(eval(&source(2)), Value::from("two"));
    assert_eq!(eval(&source(7)), Value::from("many"));
}

#[test]
fn test_if_value() {
    assert_eq!(eval("if true 1 else 2 end"), num(1.0));
    assert_eq!(eval("if false 1 end"), Value::Null);
}

#[test]
fn test_while() {
    assert_eq!(
        eval("i = 0 total = 0 while i < 5 i++ total += i end total"),
        num(15.0)
    );
    assert_eq!(eval("while false end"), Value::Null);
}

#[test]
fn test_break_and_continue() {
    let source = "i = 0 s = 0
        while true
            i++
            if i > 10 break end
            if i % 2 == 0 continue end
            s += i
        end
        s";
    assert_eq!(eval(source), num(25.0));
}

#[test]
fn test_for_over_array_and_string() {
    assert_eq!(eval("s = 0 for x in [1, 2, 3] s += x end s"), num(6.0));
    assert_eq!(
        eval("out = \"\" for c in \"abc\" out = c + out end out"),
        Value::from("cba")
    );
}

#[test]
fn test_for_binding_is_scoped_to_the_loop() {
    let err = eval_err("for x in [1] end x");
    assert_eq!(err.category(), ErrorCategory::Name);
}

#[test]
fn test_for_iterates_a_snapshot() {
    assert_eq!(
        output("a = [1, 2] for x in a a = [9] print(x) end"),
        "1\n2\n"
    );
}

#[test]
fn test_nested_loop_break_only_exits_inner() {
    let source = "n = 0
        for i in [1, 2, 3]
            for j in [1, 2, 3]
                if j == 2 break end
                n++
            end
        end
        n";
    assert_eq!(eval(source), num(3.0));
}

#[test]
fn test_switch() {
    let source = |x: &str| format!("switch {x} case 1 \"a\" case 2 \"b\" default \"c\" end");
    assert_eq!(eval(&source("1")), Value::from("a"));
    assert_eq!(eval(&source("2")), Value::from("b"));
    assert_eq!(eval(&source("\"2\"")), Value::from("c"));
    assert_eq!(eval("switch 5 case 1 \"a\" end"), Value::Null);
}

#[test]
fn test_match_is_switch() {
    assert_eq!(
        eval("match \"go\" case \"stop\" 0 case \"go\" 1 end"),
        num(1.0)
    );
}

#[test]
fn test_conditions_must_be_bools() {
    let err = eval_err("if 1 end");
    assert_eq!(
        err.to_string(),
        "TypeError: condition of `if` must be a bool, found number"
    );
    let err = eval_err("while null end");
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_for_rejects_non_iterables() {
    let err = eval_err("for x in 5 end");
    assert_eq!(err.to_string(), "TypeError: cannot iterate over number");
}
