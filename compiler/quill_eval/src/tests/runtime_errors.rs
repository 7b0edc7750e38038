use pretty_assertions::assert_eq;
use quill_diagnostic::ErrorCode;
use quill_ir::Span;

use super::{eval_err, interp};
use crate::{ErrorCategory, EvalErrorKind};

#[test]
fn test_division_by_zero() {
    let err = eval_err("5 / 0");
    assert_eq!(err.category(), ErrorCategory::Arithmetic);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.span, Some(Span::new(0, 5)));
    assert_eq!(eval_err("x = 3 x %= 0").kind, EvalErrorKind::ModuloByZero);
}

#[test]
fn test_undefined_variable_points_at_the_name() {
    let err = eval_err("1 + missing");
    assert_eq!(err.to_string(), "NameError: undefined variable `missing`");
    assert_eq!(err.span, Some(Span::new(4, 11)));
}

#[test]
fn test_compound_assignment_needs_an_existing_binding() {
    assert_eq!(eval_err("count += 1").category(), ErrorCategory::Name);
    assert_eq!(eval_err("count++").category(), ErrorCategory::Name);
}

#[test]
fn test_type_errors() {
    assert_eq!(eval_err("true + 1").category(), ErrorCategory::Type);
    assert_eq!(eval_err("\"a\" * 2").category(), ErrorCategory::Type);
    assert_eq!(eval_err("s = \"a\" s -= 1").category(), ErrorCategory::Type);
    assert_eq!(
        eval_err("s = \"a\" s++").to_string(),
        "TypeError: bad operand type for unary `++`: string"
    );
    assert_eq!(eval_err("-\"a\"").category(), ErrorCategory::Type);
    assert_eq!(eval_err("1 and true").category(), ErrorCategory::Type);
    assert_eq!(eval_err("5[0]").category(), ErrorCategory::Type);
    assert_eq!(eval_err("[1][\"0\"]").category(), ErrorCategory::Type);
}

#[test]
fn test_index_errors() {
    let err = eval_err("[1, 2][5]");
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfRange { index: 5, len: 2 });
    assert_eq!(err.category(), ErrorCategory::Range);
    assert_eq!(
        eval_err("[1][-1]").kind,
        EvalErrorKind::IndexOutOfRange { index: -1, len: 1 }
    );
    assert_eq!(
        eval_err("\"ab\"[0.5]").kind,
        EvalErrorKind::NonIntegerIndex { index: 0.5 }
    );
}

#[test]
fn test_backtrace_lists_script_frames_innermost_first() {
    let err = eval_err(
        "function inner() return 1 / 0 end
function outer() return inner() end
outer()",
    );
    let names: Vec<&str> = err
        .backtrace
        .frames()
        .iter()
        .map(|frame| frame.name.as_str())
        .collect();
    assert_eq!(names, vec!["inner", "outer"]);

    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E3005);
    assert_eq!(diag.labels.len(), 3);
}

#[test]
fn test_error_aborts_the_rest_of_the_script() {
    let mut interp = interp();
    let err = interp.interpret("print(1) print(missing) print(2)").unwrap_err();
    assert_eq!(err.as_runtime().unwrap().category(), ErrorCategory::Name);
    assert_eq!(interp.print_output(), "1\n");
}

#[test]
fn test_runtime_error_diagnostic_codes() {
    let cases = [
        ("missing", ErrorCode::E3001),
        ("true + 1", ErrorCode::E3002),
        ("function f(a) end f()", ErrorCode::E3003),
        ("[][0]", ErrorCode::E3004),
        ("1 % 0", ErrorCode::E3005),
        ("use \"m\"", ErrorCode::E3008),
    ];
    for (source, code) in cases {
        assert_eq!(eval_err(source).code(), code, "{source}");
    }
}
