//! Parser tests.
//!
//! - `parser`: tree shapes for expressions and constructs
//! - `context`: `return`/`break`/`continue` legality
//! - `recovery`: diagnostics, synchronization and progress

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod context;
mod parser;

use quill_ir::{ExprId, ExprKind, ExprRange, NameRange, StringInterner};

use crate::{parse_source, ParseResult};

/// Parse `source` with a fresh interner.
pub(super) fn parse(source: &str) -> (ParseResult, StringInterner) {
    let interner = StringInterner::new();
    let result = parse_source(source, &interner);
    (result, interner)
}

/// Parse and render every top-level statement as an s-expression.
pub(super) fn sexprs(source: &str) -> Vec<String> {
    let (result, interner) = parse(source);
    assert!(result.ok(), "unexpected errors: {}", result.message());
    result
        .statements()
        .iter()
        .map(|id| sexpr(&result, &interner, *id))
        .collect()
}

/// Parse a single expression statement and render it.
pub(super) fn sexpr_of(source: &str) -> String {
    let mut all = sexprs(source);
    assert_eq!(all.len(), 1, "expected one statement in {source:?}");
    all.remove(0)
}

pub(super) fn sexpr(result: &ParseResult, interner: &StringInterner, id: ExprId) -> String {
    let arena = &result.arena;
    let r = |id: ExprId| sexpr(result, interner, id);
    let list = |range: ExprRange| {
        arena
            .get_expr_list(range)
            .iter()
            .map(|id| sexpr(result, interner, *id))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let names = |range: NameRange| {
        arena
            .get_names(range)
            .iter()
            .map(|n| interner.lookup(*n))
            .collect::<Vec<_>>()
            .join(" ")
    };

    match arena.get_expr(id).kind {
        ExprKind::Number(bits) => format!("{}", f64::from_bits(bits)),
        ExprKind::Str(name) => format!("{:?}", interner.lookup(name)),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Null => "null".to_string(),
        ExprKind::Ident(name) => interner.lookup(name).to_string(),
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), r(operand)),
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", op.as_symbol(), r(left), r(right))
        }
        ExprKind::Member { object, member } => format!("(. {} {})", r(object), r(member)),
        ExprKind::Assign { op, target, value } => match value {
            Some(v) => format!("({} {} {})", op.as_symbol(), interner.lookup(target), r(v)),
            None => format!("({} {})", op.as_symbol(), interner.lookup(target)),
        },
        ExprKind::Array(items) => format!("[{}]", list(items)),
        ExprKind::EventLiteral { event, params } => format!("{} {{{}}}", r(event), names(params)),
        ExprKind::Body(stmts) => format!("{{{}}}", list(stmts)),
        ExprKind::Use(path) => format!("(use {:?})", interner.lookup(path)),
        ExprKind::On { header, body } => format!("(on {} {})", r(header), r(body)),
        ExprKind::Return(Some(v)) => format!("(return {})", r(v)),
        ExprKind::Return(None) => "(return)".to_string(),
        ExprKind::Break => "break".to_string(),
        ExprKind::Continue => "continue".to_string(),
        ExprKind::Switch {
            subject,
            cases,
            default,
        } => {
            let mut out = format!("(switch {}", r(subject));
            for case in arena.get_cases(cases) {
                out.push_str(&format!(" (case {} {})", r(case.value), r(case.body)));
            }
            if let Some(d) = default {
                out.push_str(&format!(" (default {})", r(d)));
            }
            out.push(')');
            out
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => match else_branch {
            Some(e) => format!("(if {} {} {})", r(cond), r(then_branch), r(e)),
            None => format!("(if {} {})", r(cond), r(then_branch)),
        },
        ExprKind::While { cond, body } => format!("(while {} {})", r(cond), r(body)),
        ExprKind::For {
            binding,
            iter,
            body,
        } => format!("(for {} {} {})", interner.lookup(binding), r(iter), r(body)),
        ExprKind::Function { name, params, body } => format!(
            "(function {} ({}) {})",
            interner.lookup(name),
            names(params),
            r(body)
        ),
        ExprKind::Call { callee, args } if args.is_empty() => format!("(call {})", r(callee)),
        ExprKind::Call { callee, args } => format!("(call {} {})", r(callee), list(args)),
        ExprKind::Index { receiver, index } => format!("(index {} {})", r(receiver), r(index)),
        ExprKind::Error { .. } => format!(
            "(error {:?})",
            result.error_for(id).map_or("", |err| err.message.as_str())
        ),
    }
}
