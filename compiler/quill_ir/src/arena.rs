//! Flat storage for a parsed script.
//!
//! Nodes are appended by the parser and never mutated afterwards. Lists of
//! children live in side tables and are addressed by range, so a node stays
//! `Copy` and the whole tree frees in one go when the arena drops.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::ast::{Expr, SwitchCase};
use crate::{CaseRange, ExprId, ExprRange, Name, NameRange};

/// Arena holding every node of one parsed script.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    names: Vec<Name>,
    cases: Vec<SwitchCase>,
}

/// Convert a side-table length to a `u32` offset.
///
/// Scripts are capped at `u32::MAX` bytes and every node consumes at least one
/// byte of source, so table lengths stay below that bound.
#[inline]
fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the arena for a script of `source_len` bytes.
    ///
    /// Roughly one node per twenty bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimate = source_len / 20;
        ExprArena {
            exprs: Vec::with_capacity(estimate),
            expr_lists: Vec::with_capacity(estimate / 2),
            names: Vec::new(),
            cases: Vec::new(),
        }
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len());
        self.expr_lists.extend(ids);
        ExprRange::new(start, to_u32(self.expr_lists.len()) - start)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    pub fn alloc_names(&mut self, names: impl IntoIterator<Item = Name>) -> NameRange {
        let start = to_u32(self.names.len());
        self.names.extend(names);
        NameRange::new(start, to_u32(self.names.len()) - start)
    }

    #[inline]
    pub fn get_names(&self, range: NameRange) -> &[Name] {
        &self.names[range.to_range()]
    }

    pub fn alloc_cases(&mut self, cases: impl IntoIterator<Item = SwitchCase>) -> CaseRange {
        let start = to_u32(self.cases.len());
        self.cases.extend(cases);
        CaseRange::new(start, to_u32(self.cases.len()) - start)
    }

    #[inline]
    pub fn get_cases(&self, range: CaseRange) -> &[SwitchCase] {
        &self.cases[range.to_range()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("expr_lists", &self.expr_lists.len())
            .field("names", &self.names.len())
            .field("cases", &self.cases.len())
            .finish()
    }
}

/// Arena shared between a parse result and the function values created
/// from it. Script functions outlive the parse that produced them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether two handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::ast::ExprKind;
    use crate::Span;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = ExprArena::new();
        let one = arena.alloc_expr(Expr::new(ExprKind::number(1.0), Span::new(0, 1)));
        let two = arena.alloc_expr(Expr::new(ExprKind::number(2.0), Span::new(2, 3)));
        assert_eq!(arena.get_expr(one).kind.as_number(), Some(1.0));
        assert_eq!(arena.get_expr(two).span, Span::new(2, 3));
        assert_eq!(arena.expr_count(), 2);
    }

    #[test]
    fn test_lists_are_contiguous() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Null, Span::DUMMY));
        let b = arena.alloc_expr(Expr::new(ExprKind::Bool(true), Span::DUMMY));
        let first = arena.alloc_expr_list([a, b]);
        let second = arena.alloc_expr_list([b]);
        assert_eq!(arena.get_expr_list(first), &[a, b]);
        assert_eq!(arena.get_expr_list(second), &[b]);
        assert!(arena.alloc_expr_list([]).is_empty());
    }

    #[test]
    fn test_names_and_cases() {
        let mut arena = ExprArena::new();
        let names = arena.alloc_names([Name::from_raw(1), Name::from_raw(2)]);
        assert_eq!(arena.get_names(names).len(), 2);

        let v = arena.alloc_expr(Expr::new(ExprKind::number(1.0), Span::DUMMY));
        let cases = arena.alloc_cases([SwitchCase { value: v, body: v }]);
        assert_eq!(arena.get_cases(cases)[0].value, v);
    }

    #[test]
    fn test_shared_arena_ptr_eq() {
        let shared = SharedArena::new(ExprArena::new());
        let clone = shared.clone();
        assert!(shared.ptr_eq(&clone));
        assert!(!shared.ptr_eq(&SharedArena::new(ExprArena::new())));
    }
}
