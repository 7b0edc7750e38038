//! Tree shapes.

use pretty_assertions::assert_eq;

use super::{parse, sexpr_of, sexprs};

#[test]
fn test_empty_program_is_valid() {
    let (result, _) = parse("  # only a comment\n");
    assert!(result.ok());
    assert!(result.statements().is_empty());
}

#[test]
fn test_literals() {
    assert_eq!(
        sexprs("42 2.5 \"hi\" 'x' true false null name"),
        vec!["42", "2.5", "\"hi\"", "\"x\"", "true", "false", "null", "name"]
    );
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(sexpr_of("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(sexpr_of("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(sexpr_of("10 - 4 - 3"), "(- (- 10 4) 3)");
    assert_eq!(sexpr_of("7 % 4 / 2"), "(/ (% 7 4) 2)");
}

#[test]
fn test_pow_is_right_associative() {
    assert_eq!(sexpr_of("2 ** 3 ** 2"), "(** 2 (** 3 2))");
}

#[test]
fn test_negative_literals() {
    assert_eq!(sexpr_of("-5"), "-5");
    assert_eq!(sexpr_of("a -5"), "(- a 5)");
    assert_eq!(sexpr_of("-2 ** 2"), "(- (** 2 2))");
    assert_eq!(sexpr_of("-x * y"), "(* (- x) y)");
    assert_eq!(sexpr_of("+x"), "(+ x)");
    assert_eq!(sexpr_of("~x"), "(~ x)");
}

#[test]
fn test_logical_and_bitwise_ladder() {
    assert_eq!(sexpr_of("not a and b"), "(and (not a) b)");
    assert_eq!(sexpr_of("a or b and c"), "(or a (and b c))");
    assert_eq!(sexpr_of("a & b | c ^ d"), "(| (& a b) (^ c d))");
    assert_eq!(sexpr_of("1 << 2 + 3"), "(<< 1 (+ 2 3))");
    assert_eq!(sexpr_of("a < b == c"), "(== (< a b) c)");
    assert_eq!(sexpr_of("a + 1 > b and c"), "(and (> (+ a 1) b) c)");
}

#[test]
fn test_assignment_forms() {
    assert_eq!(sexpr_of("x = y = 3"), "(= x (= y 3))");
    assert_eq!(sexpr_of("x += 1 + 2"), "(+= x (+ 1 2))");
    assert_eq!(sexpr_of("x -= 1"), "(-= x 1)");
    assert_eq!(sexpr_of("x %= 2"), "(%= x 2)");
    assert_eq!(sexpr_of("i++"), "(++ i)");
    assert_eq!(sexpr_of("i--"), "(-- i)");
    assert_eq!(sexpr_of("ok = a or b"), "(= ok (or a b))");
}

#[test]
fn test_postfix_call_and_index() {
    assert_eq!(sexpr_of("f()"), "(call f)");
    assert_eq!(sexpr_of("f(1, 2)[0]"), "(index (call f 1 2) 0)");
    assert_eq!(sexpr_of("grid[1][2]"), "(index (index grid 1) 2)");
    assert_eq!(sexpr_of("make()(3)"), "(call (call make) 3)");
}

#[test]
fn test_member_access() {
    assert_eq!(sexpr_of("a.b.c"), "(. (. a b) c)");
    assert_eq!(sexpr_of("obj.method(x)"), "(. obj (call method x))");
    assert_eq!(sexpr_of("-a.b"), "(- (. a b))");
    assert_eq!(sexpr_of("a.b * 2"), "(* (. a b) 2)");
}

#[test]
fn test_array_literals() {
    assert_eq!(sexpr_of("[]"), "[]");
    assert_eq!(sexpr_of("[1, \"two\", [3],]"), "[1 \"two\" [3]]");
}

#[test]
fn test_statements_without_separators() {
    assert_eq!(sexprs("x = 1 y = x + 1"), vec!["(= x 1)", "(= y (+ x 1))"]);
}

#[test]
fn test_if_chain_shares_one_end() {
    assert_eq!(
        sexpr_of("if a x elif b y else if c z else w end"),
        "(if a {x} (if b {y} (if c {z} {w})))"
    );
    assert_eq!(sexpr_of("if a end"), "(if a {})");
}

#[test]
fn test_loops() {
    assert_eq!(
        sexpr_of("while x < 3 x += 1 end"),
        "(while (< x 3) {(+= x 1)})"
    );
    assert_eq!(
        sexpr_of("for i in [1, 2] print(i) end"),
        "(for i [1 2] {(call print i)})"
    );
}

#[test]
fn test_function_definition() {
    assert_eq!(
        sexpr_of("function add(a, b) return a + b end"),
        "(function add (a b) {(return (+ a b))})"
    );
    assert_eq!(sexpr_of("function f() return end"), "(function f () {(return)})");
}

#[test]
fn test_on_handler() {
    assert_eq!(
        sexpr_of("on \"hit\" { who, dmg } print(who) end"),
        "(on \"hit\" {who dmg} {(call print who)})"
    );
    assert_eq!(sexpr_of("on tick {} end"), "(on tick {} {})");
}

#[test]
fn test_use() {
    assert_eq!(sexpr_of("use \"lib/math.ql\""), "(use \"lib/math.ql\")");
}

#[test]
fn test_switch_and_match_alias() {
    assert_eq!(
        sexpr_of("switch x case 1 a case 2 b default c end"),
        "(switch x (case 1 {a}) (case 2 {b}) (default {c}))"
    );
    assert_eq!(sexpr_of("match x case 1 a end"), "(switch x (case 1 {a}))");
}

#[test]
fn test_spans_cover_construct() {
    let (result, _) = parse("while x y end");
    let id = result.statements()[0];
    let span = result.arena.get_expr(id).span;
    assert_eq!((span.start, span.end), (0, 13));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(sexpr_of(&source), "1");
}
