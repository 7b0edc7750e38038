//! Per-node evaluation.
//!
//! Errors pick up the span of the innermost node that has one on their way
//! out (see [`Interpreter::eval`]). `return`, `break` and `continue` travel
//! as [`Unwind::Flow`] and are caught by calls and loops.

use std::rc::Rc;

use quill_ir::{AssignOp, BinaryOp, CaseRange, ExprId, ExprKind, ExprRange, Name, NameRange, Span};
use quill_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{
    already_defined, expected_bool, undefined_variable, unsupported, ControlFlow,
    EvalErrorKind, Unwind,
};
use crate::module::module_binding_name;
use crate::operators::{add, evaluate_binary, evaluate_unary, logical_operand};
use crate::{Environment, EvalError, FunctionValue, ScriptFunction, Value};

pub(super) type ExecResult = Result<Value, Unwind>;

/// What a loop body asked for.
enum LoopStep {
    Next,
    Exit,
}

impl Interpreter {
    /// Evaluate one node of the current arena in `env`.
    pub(super) fn eval(&mut self, id: ExprId, env: &Environment) -> ExecResult {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(id);
            self.eval_kind(expr.kind, expr.span, env)
                .map_err(|unwind| unwind.or_span(expr.span))
        })
    }

    fn eval_kind(&mut self, kind: ExprKind, span: Span, env: &Environment) -> ExecResult {
        match kind {
            ExprKind::Number(bits) => Ok(Value::Number(f64::from_bits(bits))),
            ExprKind::Str(name) => Ok(Value::from(self.interner.lookup(name))),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Ident(name) => Ok(self.lookup(name, env)?),

            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand, env)?;
                Ok(evaluate_unary(&value, op)?)
            }
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::And | BinaryOp::Or => self.eval_logical(op, left, right, env),
                _ => {
                    let left = self.eval(left, env)?;
                    let right = self.eval(right, env)?;
                    Ok(evaluate_binary(&left, &right, op)?)
                }
            },
            ExprKind::Member { object, member } => self.eval_member(object, member, env),
            ExprKind::Assign { op, target, value } => self.eval_assign(op, target, value, env),

            ExprKind::Array(items) => Ok(Value::array(self.eval_list(items, env)?)),
            // A bare event literal evaluates to its event value.
            ExprKind::EventLiteral { event, .. } => self.eval(event, env),
            ExprKind::Body(stmts) => self.eval_statements(stmts, env),

            ExprKind::Use(path) => self.eval_use(path, env),
            ExprKind::On { header, body } => self.eval_on(header, body, env),
            ExprKind::Return(value) => {
                let value = match value {
                    Some(value) => self.eval(value, env)?,
                    None => Value::Null,
                };
                Err(Unwind::Flow(ControlFlow::Return(value)))
            }
            ExprKind::Break => Err(Unwind::Flow(ControlFlow::Break)),
            ExprKind::Continue => Err(Unwind::Flow(ControlFlow::Continue)),

            ExprKind::Switch {
                subject,
                cases,
                default,
            } => self.eval_switch(subject, cases, default, env),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond, "condition of `if`", env)? {
                    self.eval(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch, env)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::While { cond, body } => self.eval_while(cond, body, span, env),
            ExprKind::For {
                binding,
                iter,
                body,
            } => self.eval_for(binding, iter, body, span, env),
            ExprKind::Function { name, params, body } => {
                let function = self.make_function(self.interner.lookup(name), params, body, env);
                env.define(name, function)
                    .map_err(|_| already_defined(self.interner.lookup(name)))?;
                Ok(Value::Null)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval(callee, env)?;
                let args = self.eval_list(args, env)?;
                self.call_value(&callee, args, span)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval(receiver, env)?;
                let index = self.eval(index, env)?;
                Ok(index_value(&receiver, &index)?)
            }

            ExprKind::Error { .. } => {
                Err(unsupported("cannot evaluate code that failed to parse").into())
            }
        }
    }

    /// Run `stmts` in order, charging one step each. The value is the last
    /// statement's, or null for an empty list.
    pub(super) fn eval_statements(&mut self, stmts: ExprRange, env: &Environment) -> ExecResult {
        let arena = self.arena.clone();
        let mut last = Value::Null;
        for &stmt in arena.get_expr_list(stmts) {
            self.budget
                .tick()
                .map_err(|err| err.or_span(arena.get_expr(stmt).span))?;
            last = self.eval(stmt, env)?;
        }
        Ok(last)
    }

    fn eval_list(&mut self, items: ExprRange, env: &Environment) -> Result<Vec<Value>, Unwind> {
        let arena = self.arena.clone();
        let ids = arena.get_expr_list(items);
        let mut values = Vec::with_capacity(ids.len());
        for &id in ids {
            values.push(self.eval(id, env)?);
        }
        Ok(values)
    }

    fn lookup(&self, name: Name, env: &Environment) -> Result<Value, EvalError> {
        env.get(name)
            .ok_or_else(|| undefined_variable(self.interner.lookup(name)))
    }

    fn eval_condition(
        &mut self,
        cond: ExprId,
        context: &'static str,
        env: &Environment,
    ) -> Result<bool, Unwind> {
        let value = self.eval(cond, env)?;
        value.as_bool().ok_or_else(|| {
            let span = self.arena.get_expr(cond).span;
            expected_bool(context, &value).or_span(span).into()
        })
    }

    /// `and`/`or`: the right operand is only evaluated when it decides.
    fn eval_logical(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        env: &Environment,
    ) -> ExecResult {
        let lhs = self.eval(left, env)?;
        let lhs = logical_operand(op, &lhs)?;
        let decided = if op == BinaryOp::And { !lhs } else { lhs };
        if decided {
            return Ok(Value::Bool(lhs));
        }
        let rhs = self.eval(right, env)?;
        Ok(Value::Bool(logical_operand(op, &rhs)?))
    }

    fn eval_member(&mut self, object: ExprId, member: ExprId, env: &Environment) -> ExecResult {
        let target = self.eval(object, env)?;
        let Value::Object(scope) = &target else {
            return Err(EvalErrorKind::NotAnObject {
                got: target.type_name(),
            }
            .into());
        };
        self.eval_in_object(member, scope, env)
    }

    /// Evaluate the right side of `.` against `scope`. Names resolve in the
    /// object; call arguments and index expressions resolve in `caller`.
    fn eval_in_object(
        &mut self,
        member: ExprId,
        scope: &Environment,
        caller: &Environment,
    ) -> ExecResult {
        let expr = *self.arena.get_expr(member);
        let result = match expr.kind {
            ExprKind::Ident(name) => scope
                .get(name)
                .ok_or_else(|| undefined_variable(self.interner.lookup(name)).into()),
            ExprKind::Call { callee, args } => {
                let callee = self.eval_in_object(callee, scope, caller)?;
                let args = self.eval_list(args, caller)?;
                self.call_value(&callee, args, expr.span)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval_in_object(receiver, scope, caller)?;
                let index = self.eval(index, caller)?;
                index_value(&receiver, &index).map_err(Unwind::from)
            }
            _ => self.eval(member, scope),
        };
        result.map_err(|unwind| unwind.or_span(expr.span))
    }

    fn eval_assign(
        &mut self,
        op: AssignOp,
        target: Name,
        value: Option<ExprId>,
        env: &Environment,
    ) -> ExecResult {
        let rhs = match value {
            Some(value) => self.eval(value, env)?,
            None => Value::Null,
        };
        let updated = match op {
            AssignOp::Assign => {
                env.assign(target, rhs.clone());
                return Ok(rhs);
            }
            AssignOp::AddAssign => add(&self.lookup(target, env)?, &rhs)?,
            AssignOp::SubAssign => evaluate_binary(&self.lookup(target, env)?, &rhs, BinaryOp::Sub)?,
            AssignOp::ModAssign => evaluate_binary(&self.lookup(target, env)?, &rhs, BinaryOp::Mod)?,
            AssignOp::Increment | AssignOp::Decrement => {
                let current = self.lookup(target, env)?;
                let &Value::Number(n) = &current else {
                    return Err(EvalErrorKind::UnaryTypeMismatch {
                        op: op.as_symbol(),
                        operand: current.type_name(),
                    }
                    .into());
                };
                Value::Number(if op == AssignOp::Increment { n + 1.0 } else { n - 1.0 })
            }
        };
        env.set(target, updated.clone())
            .map_err(|_| undefined_variable(self.interner.lookup(target)))?;
        Ok(updated)
    }

    fn eval_switch(
        &mut self,
        subject: ExprId,
        cases: CaseRange,
        default: Option<ExprId>,
        env: &Environment,
    ) -> ExecResult {
        let subject = self.eval(subject, env)?;
        let arena = self.arena.clone();
        for case in arena.get_cases(cases) {
            let value = self.eval(case.value, env)?;
            if subject.equals(&value) {
                return self.eval(case.body, env);
            }
        }
        match default {
            Some(body) => self.eval(body, env),
            None => Ok(Value::Null),
        }
    }

    /// The body shares the loop's scope.
    fn eval_while(
        &mut self,
        cond: ExprId,
        body: ExprId,
        span: Span,
        env: &Environment,
    ) -> ExecResult {
        while self.eval_condition(cond, "condition of `while`", env)? {
            self.budget.tick().map_err(|err| err.or_span(span))?;
            match self.run_loop_body(body, env)? {
                LoopStep::Next => {}
                LoopStep::Exit => break,
            }
        }
        Ok(Value::Null)
    }

    /// Each iteration gets a fresh child scope holding the loop variable, so
    /// closures created in the body capture that iteration's value. Arrays
    /// are iterated over a snapshot of their elements.
    fn eval_for(
        &mut self,
        binding: Name,
        iter: ExprId,
        body: ExprId,
        span: Span,
        env: &Environment,
    ) -> ExecResult {
        let iterable = self.eval(iter, env)?;
        let items: Vec<Value> = match &iterable {
            Value::Array(items) => items.borrow().clone(),
            Value::Str(s) => s.chars().map(|c| Value::from(c.to_string())).collect(),
            other => {
                let span = self.arena.get_expr(iter).span;
                let err = EvalError::from(EvalErrorKind::NotIterable {
                    got: other.type_name(),
                });
                return Err(err.or_span(span).into());
            }
        };

        for item in items {
            self.budget.tick().map_err(|err| err.or_span(span))?;
            let scope = env.child();
            scope
                .define(binding, item)
                .map_err(|_| already_defined(self.interner.lookup(binding)))?;
            match self.run_loop_body(body, &scope)? {
                LoopStep::Next => {}
                LoopStep::Exit => break,
            }
        }
        Ok(Value::Null)
    }

    fn run_loop_body(&mut self, body: ExprId, env: &Environment) -> Result<LoopStep, Unwind> {
        match self.eval(body, env) {
            Ok(_) | Err(Unwind::Flow(ControlFlow::Continue)) => Ok(LoopStep::Next),
            Err(Unwind::Flow(ControlFlow::Break)) => Ok(LoopStep::Exit),
            Err(other) => Err(other),
        }
    }

    fn eval_use(&mut self, path: Name, env: &Environment) -> ExecResult {
        let path = self.interner.lookup(path);
        let Some(resolver) = &self.resolver else {
            return Err(unsupported(format!(
                "cannot load module \"{path}\": no module resolver installed"
            ))
            .into());
        };
        let module = resolver.resolve(path)?;
        if let (Value::Object(_), Some(name)) = (&module, module_binding_name(path)) {
            env.assign(self.interner.intern(name), module.clone());
        }
        Ok(module)
    }

    /// Register a handler. The event expression is evaluated once, here.
    fn eval_on(&mut self, header: ExprId, body: ExprId, env: &Environment) -> ExecResult {
        let ExprKind::EventLiteral { event, params } = self.arena.get_expr(header).kind else {
            return Err(unsupported("`on` requires an event header").into());
        };
        let event = self.eval(event, env)?;
        let handler = self.make_function(&format!("on {event}"), params, body, env);
        self.events.register(event, handler);
        Ok(Value::Null)
    }

    fn make_function(
        &self,
        name: &str,
        params: NameRange,
        body: ExprId,
        env: &Environment,
    ) -> Value {
        Value::Function(Rc::new(FunctionValue::Script(ScriptFunction {
            name: Rc::from(name),
            params: Rc::from(self.arena.get_names(params)),
            body,
            arena: self.arena.clone(),
            closure: env.clone(),
        })))
    }
}

/// `receiver[index]` for arrays and strings.
fn index_value(receiver: &Value, index: &Value) -> Result<Value, EvalError> {
    let len = match receiver {
        Value::Array(items) => items.borrow().len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(EvalErrorKind::NotIndexable {
                got: other.type_name(),
            }
            .into())
        }
    };
    let &Value::Number(n) = index else {
        return Err(EvalErrorKind::BinaryTypeMismatch {
            op: "[]",
            left: receiver.type_name(),
            right: index.type_name(),
        }
        .into());
    };
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(EvalErrorKind::NonIntegerIndex { index: n }.into());
    }

    #[allow(clippy::cast_possible_truncation)]
    let i = n as i64;
    let slot = usize::try_from(i).ok().filter(|&slot| slot < len);
    let Some(slot) = slot else {
        return Err(EvalErrorKind::IndexOutOfRange { index: i, len }.into());
    };

    Ok(match receiver {
        Value::Array(items) => items.borrow()[slot].clone(),
        // `slot < len` was checked against the char count.
        _ => receiver
            .as_str()
            .and_then(|s| s.chars().nth(slot))
            .map_or(Value::Null, |c| Value::from(c.to_string())),
    })
}
