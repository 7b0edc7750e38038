//! Constructs closed by `end`.
//!
//! The header stays on the current line, each body statement goes on its
//! own line one level deeper, and clause keywords (`elif`, `else`, `case`,
//! `default`) and `end` line up with the header.

use quill_ir::{ExprId, ExprKind, NameRange};

use super::Formatter;
use crate::emitter::Emitter;

impl Formatter<'_> {
    pub(super) fn format_block(&mut self, id: ExprId) {
        let arena = self.arena;
        match arena.get_expr(id).kind {
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.emit("if ");
                self.format_expr(cond);
                self.format_body(then_branch);

                // `elif` arms are nested `If` nodes in the else branch.
                let mut next = else_branch;
                while let Some(branch) = next {
                    self.out.emit_indent(self.indent);
                    if let ExprKind::If {
                        cond,
                        then_branch,
                        else_branch,
                    } = arena.get_expr(branch).kind
                    {
                        self.out.emit("elif ");
                        self.format_expr(cond);
                        self.format_body(then_branch);
                        next = else_branch;
                    } else {
                        self.out.emit("else");
                        self.format_body_inner(branch, true);
                        next = None;
                    }
                }
            }
            ExprKind::While { cond, body } => {
                self.out.emit("while ");
                self.format_expr(cond);
                self.format_body(body);
            }
            ExprKind::For {
                binding,
                iter,
                body,
            } => {
                self.out.emit("for ");
                self.emit_name(binding);
                self.out.emit(" in ");
                self.format_expr(iter);
                self.format_body(body);
            }
            ExprKind::Function { name, params, body } => {
                self.out.emit("function ");
                self.emit_name(name);
                self.out.emit("(");
                self.format_params(params);
                self.out.emit(")");
                self.format_body(body);
            }
            ExprKind::On { header, body } => {
                self.out.emit("on ");
                self.format_expr(header);
                self.format_body(body);
            }
            ExprKind::Switch {
                subject,
                cases,
                default,
            } => {
                self.out.emit("switch ");
                self.format_expr(subject);
                self.out.emit_newline();
                for case in arena.get_cases(cases) {
                    self.out.emit_indent(self.indent);
                    self.out.emit("case ");
                    self.format_expr(case.value);
                    self.format_body(case.body);
                }
                if let Some(default) = default {
                    self.out.emit_indent(self.indent);
                    self.out.emit("default");
                    self.format_body(default);
                }
            }
            _ => {
                self.format_expr(id);
                return;
            }
        }
        self.out.emit_indent(self.indent);
        self.out.emit("end");
    }

    /// `event { a, b }`
    pub(super) fn format_event_header(&mut self, event: ExprId, params: NameRange) {
        self.format_expr(event);
        if params.is_empty() {
            self.out.emit(" {}");
        } else {
            self.out.emit(" { ");
            self.format_params(params);
            self.out.emit(" }");
        }
    }

    /// Newline, then the body's statements one level deeper. Leaves the
    /// output at the start of a line.
    fn format_body(&mut self, body: ExprId) {
        self.format_body_inner(body, false);
    }

    fn format_body_inner(&mut self, body: ExprId, after_else: bool) {
        self.out.emit_newline();
        self.indent += 1;
        let arena = self.arena;
        let stmts = match arena.get_expr(body).kind {
            ExprKind::Body(stmts) => arena.get_expr_list(stmts),
            _ => std::slice::from_ref(&body),
        };
        for (i, &stmt) in stmts.iter().enumerate() {
            self.out.emit_indent(self.indent);
            // `else if` would re-parse as another arm of the chain.
            let leading_if =
                after_else && i == 0 && matches!(arena.get_expr(stmt).kind, ExprKind::If { .. });
            self.format_operand(stmt, leading_if);
            self.out.emit_newline();
        }
        self.indent -= 1;
    }

    fn format_params(&mut self, params: NameRange) {
        let arena = self.arena;
        for (i, &name) in arena.get_names(params).iter().enumerate() {
            if i > 0 {
                self.out.emit(", ");
            }
            self.emit_name(name);
        }
    }
}
