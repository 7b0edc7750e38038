//! Context checks for `return`, `break` and `continue`.

use pretty_assertions::assert_eq;
use quill_diagnostic::ErrorCode;

use super::parse;
use crate::ParseErrorKind;

fn codes(source: &str) -> Vec<ErrorCode> {
    let (result, _) = parse(source);
    result.errors.iter().map(|e| e.code).collect()
}

#[test]
fn test_break_outside_loop() {
    let (result, _) = parse("break");
    assert_eq!(result.errors.len(), 1);
    let err = &result.errors[0];
    assert_eq!(err.kind, ParseErrorKind::Context);
    assert_eq!(err.code, ErrorCode::E2002);
    assert_eq!((err.line, err.column), (1, 1));
    assert!(err.is_context_error());
}

#[test]
fn test_continue_and_return_outside() {
    assert_eq!(codes("continue"), vec![ErrorCode::E2003]);
    assert_eq!(codes("return 1"), vec![ErrorCode::E2001]);
}

#[test]
fn test_loop_exits_inside_loops() {
    assert_eq!(codes("while true break end"), vec![]);
    assert_eq!(codes("for x in xs if x continue end end"), vec![]);
    assert_eq!(codes("while true switch x case 1 break end end"), vec![]);
}

#[test]
fn test_break_in_switch_outside_loop() {
    assert_eq!(codes("switch x case 1 break end"), vec![ErrorCode::E2002]);
}

#[test]
fn test_function_resets_loop_legality() {
    assert_eq!(
        codes("while true function f() break end end"),
        vec![ErrorCode::E2002]
    );
    assert_eq!(
        codes("function f() while true break end end"),
        vec![]
    );
}

#[test]
fn test_return_inside_function_and_handler() {
    assert_eq!(codes("function f() while true return 1 end end"), vec![]);
    assert_eq!(codes("on \"tick\" { dt } return dt end"), vec![]);
    assert_eq!(codes("on \"tick\" {} break end"), vec![ErrorCode::E2002]);
}

#[test]
fn test_context_error_does_not_hide_later_errors() {
    assert_eq!(
        codes("break\nx = )\ncontinue"),
        vec![ErrorCode::E2002, ErrorCode::E1002, ErrorCode::E2003]
    );
}

#[test]
fn test_context_error_consumes_return_value() {
    let (result, _) = parse("return 1 + 2\ny = 3");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.statements().len(), 2);
}
