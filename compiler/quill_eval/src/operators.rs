//! Binary and unary operator semantics.
//!
//! `and`/`or` are not evaluated here when they short-circuit: the
//! interpreter checks the left operand with [`logical_operand`] first and
//! only evaluates the right one when it decides the result.

use std::rc::Rc;

use quill_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, expected_bool, modulo_by_zero, unary_type_mismatch,
};
use crate::value::display_number;
use crate::{EvalError, Value};

/// Truncate a number for the bitwise operators. NaN becomes 0 and
/// out-of-range values saturate.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn to_int(n: f64) -> i64 {
    n as i64
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn from_int(n: i64) -> Value {
    Value::Number(n as f64)
}

/// Shift amounts wrap into `0..64`.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn shift_amount(n: f64) -> u32 {
    (to_int(n) & 63) as u32
}

/// Check one operand of `and`/`or`.
pub fn logical_operand(op: BinaryOp, value: &Value) -> Result<bool, EvalError> {
    value
        .as_bool()
        .ok_or_else(|| expected_bool(logical_context(op), value))
}

fn logical_context(op: BinaryOp) -> &'static str {
    if op == BinaryOp::And {
        "operand of `and`"
    } else {
        "operand of `or`"
    }
}

/// `+`: numeric addition or string concatenation.
pub fn add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(concat(a, b)),
        (Value::Str(a), Value::Number(b)) => Ok(concat(a, &display_number(*b))),
        (Value::Number(a), Value::Str(b)) => Ok(concat(&display_number(*a), b)),
        _ => Err(binary_type_mismatch("+", left, right)),
    }
}

fn concat(a: &str, b: &str) -> Value {
    let mut s = String::with_capacity(a.len() + b.len());
    s.push_str(a);
    s.push_str(b);
    Value::Str(Rc::from(s))
}

/// Both operands as numbers, or a type error naming `op`.
fn numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(binary_type_mismatch(op.as_symbol(), left, right)),
    }
}

/// Evaluate a binary operator on two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    let nums = || numbers(op, left, right);
    let number = |f: fn(f64, f64) -> f64| nums().map(|(a, b)| Value::Number(f(a, b)));
    let compare = |f: fn(&f64, &f64) -> bool| nums().map(|(a, b)| Value::Bool(f(&a, &b)));
    let bits = |f: fn(i64, i64) -> i64| nums().map(|(a, b)| from_int(f(to_int(a), to_int(b))));

    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => number(|a, b| a - b),
        BinaryOp::Mul => number(|a, b| a * b),
        BinaryOp::Div => {
            let (a, b) = nums()?;
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Number(a / b))
        }
        BinaryOp::Mod => {
            let (a, b) = nums()?;
            if b == 0.0 {
                return Err(modulo_by_zero());
            }
            Ok(Value::Number(a % b))
        }
        BinaryOp::Pow => number(f64::powf),

        BinaryOp::Eq => Ok(Value::Bool(left.equals(right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.equals(right))),
        BinaryOp::Lt => compare(f64::lt),
        BinaryOp::LtEq => compare(f64::le),
        BinaryOp::Gt => compare(f64::gt),
        BinaryOp::GtEq => compare(f64::ge),

        BinaryOp::And | BinaryOp::Or => {
            let (a, b) = (logical_operand(op, left)?, logical_operand(op, right)?);
            Ok(Value::Bool(if op == BinaryOp::And { a && b } else { a || b }))
        }

        BinaryOp::BitAnd => bits(|a, b| a & b),
        BinaryOp::BitOr => bits(|a, b| a | b),
        BinaryOp::BitXor => bits(|a, b| a ^ b),
        BinaryOp::Shl => {
            let (a, b) = nums()?;
            Ok(from_int(to_int(a).wrapping_shl(shift_amount(b))))
        }
        BinaryOp::Shr => {
            let (a, b) = nums()?;
            Ok(from_int(to_int(a).wrapping_shr(shift_amount(b))))
        }
    }
}

/// Evaluate a unary operator.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::BitNot, Value::Number(n)) => Ok(from_int(!to_int(*n))),
        _ => Err(unary_type_mismatch(op.as_symbol(), value)),
    }
}
