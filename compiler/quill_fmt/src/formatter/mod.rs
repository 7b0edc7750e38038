//! Formatter core.
//!
//! Every node has a left and right binding power as an operand. A left
//! operand is parenthesized when the parent's operator would pull in its
//! rightmost part; a right operand when it would not bind tightly enough to
//! stay grouped.
//!
//! - [`literals`]: numbers and strings
//! - [`blocks`]: constructs closed by `end`

mod blocks;
mod literals;

use quill_ir::{
    AssignOp, ExprArena, ExprId, ExprKind, StringInterner, UnaryOp, MEMBER_BINDING_POWER,
};

use quill_stack::ensure_sufficient_stack;

use crate::emitter::{Emitter, StringEmitter};

/// Binding power of self-delimiting nodes: literals, calls, `end` blocks.
const ATOM: u16 = u16::MAX;

/// Left and right binding power of a node in operand position.
fn operand_bp(kind: &ExprKind) -> (u16, u16) {
    let unary = u16::from(UnaryOp::BINDING_POWER);
    match *kind {
        ExprKind::Binary { op, .. } => {
            let (l, r) = op.binding_power();
            (l.into(), r.into())
        }
        ExprKind::Unary { .. } => (ATOM, unary),
        // Printed as `-n`, which re-parses through unary minus.
        ExprKind::Number(bits) if f64::from_bits(bits).is_sign_negative() => (ATOM, unary),
        ExprKind::Assign { value: Some(_), .. } => {
            let (l, r) = AssignOp::BINDING_POWER;
            (l.into(), r.into())
        }
        ExprKind::Member { .. } => MEMBER_BINDING_POWER,
        // `return value` swallows everything after it.
        ExprKind::Return(_) => (0, 0),
        _ => (ATOM, ATOM),
    }
}

/// Formatter over one arena.
pub struct Formatter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    out: StringEmitter,
    indent: usize,
}

impl<'a> Formatter<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Formatter {
            arena,
            interner,
            out: StringEmitter::with_capacity(arena.expr_count() * 4),
            indent: 0,
        }
    }

    /// Output with a single trailing newline.
    pub fn finish(mut self) -> String {
        self.out.ensure_trailing_newline();
        self.out.output()
    }

    pub fn into_inner(self) -> StringEmitter {
        self.out
    }

    /// One statement per line at the current indentation.
    pub fn format_statements(&mut self, stmts: &[ExprId]) {
        for &stmt in stmts {
            self.out.emit_indent(self.indent);
            self.format_expr(stmt);
            self.out.emit_newline();
        }
    }

    pub fn format_expr(&mut self, id: ExprId) {
        ensure_sufficient_stack(|| self.format_node(id));
    }

    fn format_node(&mut self, id: ExprId) {
        let arena = self.arena;
        match arena.get_expr(id).kind {
            ExprKind::Number(bits) => self.emit_number(f64::from_bits(bits)),
            ExprKind::Str(name) => self.emit_string(self.interner.lookup(name)),
            ExprKind::Bool(true) => self.out.emit("true"),
            ExprKind::Bool(false) => self.out.emit("false"),
            ExprKind::Null => self.out.emit("null"),
            ExprKind::Ident(name) => self.emit_name(name),

            ExprKind::Unary { op, operand } => {
                self.out.emit(op.as_symbol());
                if op == UnaryOp::Not {
                    self.out.emit_space();
                }
                let clash = self.starts_with_sign(operand)
                    && matches!(op, UnaryOp::Neg | UnaryOp::Plus);
                let (l, _) = operand_bp(&arena.get_expr(operand).kind);
                self.format_operand(operand, clash || l < u16::from(UnaryOp::BINDING_POWER));
            }
            ExprKind::Binary { op, left, right } => {
                let (l_bp, r_bp) = op.binding_power();
                self.format_left(left, l_bp.into());
                self.out.emit_space();
                self.out.emit(op.as_symbol());
                self.out.emit_space();
                self.format_right(right, r_bp.into());
            }
            ExprKind::Member { object, member } => {
                let (l_bp, r_bp) = MEMBER_BINDING_POWER;
                if matches!(arena.get_expr(object).kind, ExprKind::Number(_)) {
                    // `1.x` would lex as a fraction.
                    self.format_operand(object, true);
                } else {
                    self.format_left(object, l_bp);
                }
                self.out.emit(".");
                self.format_right(member, r_bp);
            }
            ExprKind::Assign { op, target, value } => {
                self.emit_name(target);
                match value {
                    Some(value) => {
                        self.out.emit_space();
                        self.out.emit(op.as_symbol());
                        self.out.emit_space();
                        self.format_right(value, AssignOp::BINDING_POWER.1.into());
                    }
                    None => self.out.emit(op.as_symbol()),
                }
            }

            ExprKind::Array(items) => {
                self.out.emit("[");
                self.format_comma_list(arena.get_expr_list(items));
                self.out.emit("]");
            }
            ExprKind::Call { callee, args } => {
                self.format_receiver(callee);
                self.out.emit("(");
                self.format_comma_list(arena.get_expr_list(args));
                self.out.emit(")");
            }
            ExprKind::Index { receiver, index } => {
                self.format_receiver(receiver);
                self.out.emit("[");
                self.format_expr(index);
                self.out.emit("]");
            }

            ExprKind::Use(path) => {
                self.out.emit("use ");
                self.emit_string(self.interner.lookup(path));
            }
            ExprKind::Return(value) => {
                self.out.emit("return");
                if let Some(value) = value {
                    self.out.emit_space();
                    self.format_expr(value);
                }
            }
            ExprKind::Break => self.out.emit("break"),
            ExprKind::Continue => self.out.emit("continue"),
            ExprKind::EventLiteral { event, params } => self.format_event_header(event, params),
            ExprKind::Body(stmts) => {
                // A body outside a construct only occurs in hand-built trees.
                self.format_inline_body(arena.get_expr_list(stmts));
            }
            ExprKind::Error { .. } => self.out.emit("# error"),

            ExprKind::If { .. }
            | ExprKind::While { .. }
            | ExprKind::For { .. }
            | ExprKind::Function { .. }
            | ExprKind::On { .. }
            | ExprKind::Switch { .. } => self.format_block(id),
        }
    }

    /// Left operand: parenthesize if the parent would absorb its tail.
    fn format_left(&mut self, id: ExprId, parent_l: u16) {
        let (_, r) = operand_bp(&self.arena.get_expr(id).kind);
        self.format_operand(id, parent_l >= r);
    }

    /// Right operand: parenthesize if it binds looser than the parent.
    fn format_right(&mut self, id: ExprId, parent_r: u16) {
        let (l, _) = operand_bp(&self.arena.get_expr(id).kind);
        self.format_operand(id, l < parent_r);
    }

    /// Callee or indexed value: anything but an atom is parenthesized.
    fn format_receiver(&mut self, id: ExprId) {
        let bp = operand_bp(&self.arena.get_expr(id).kind);
        self.format_operand(id, bp != (ATOM, ATOM));
    }

    fn format_operand(&mut self, id: ExprId, parens: bool) {
        if parens {
            self.out.emit("(");
            self.format_expr(id);
            self.out.emit(")");
        } else {
            self.format_expr(id);
        }
    }

    fn format_comma_list(&mut self, items: &[ExprId]) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.out.emit(", ");
            }
            self.format_expr(item);
        }
    }

    /// Statements of a free-standing body, space separated on one line.
    fn format_inline_body(&mut self, stmts: &[ExprId]) {
        for (i, &stmt) in stmts.iter().enumerate() {
            if i > 0 {
                self.out.emit_space();
            }
            self.format_expr(stmt);
        }
    }

    /// Whether `id` prints with a leading `-` or `+`.
    fn starts_with_sign(&self, id: ExprId) -> bool {
        match self.arena.get_expr(id).kind {
            ExprKind::Unary { op, .. } => matches!(op, UnaryOp::Neg | UnaryOp::Plus),
            ExprKind::Number(bits) => f64::from_bits(bits).is_sign_negative(),
            _ => false,
        }
    }

    fn emit_name(&mut self, name: quill_ir::Name) {
        self.out.emit(self.interner.lookup(name));
    }
}
