//! Operator semantics on runtime values.
//!
//! Operands have already been type-checked, so a mismatch here means the
//! caller skipped validation; it is still reported as an operator mismatch
//! rather than a panic.

use tala_ir::{AssignOp, BinaryOp, CondOp, Span, Type, UnaryOp, Value};

use crate::errors::{division_by_zero, modulo_by_zero, operator_mismatch, EvalResult};

/// Arithmetic. `+` with a string operand concatenates the text forms.
pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value, span: Span) -> EvalResult<Value> {
    if op == BinaryOp::Add && (left.ty() == Type::String || right.ty() == Type::String) {
        let mut text = left.to_text();
        text.push_str(&right.to_text());
        return Ok(Value::Str(text));
    }
    let (Value::Number(l), Value::Number(r)) = (&left, &right) else {
        let culprit = if left.ty() == Type::Numeric { &right } else { &left };
        return Err(operator_mismatch(op.as_symbol(), culprit.ty(), span));
    };
    let (l, r) = (*l, *r);
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(division_by_zero(span));
            }
            l / r
        }
        BinaryOp::Mod => {
            if r == 0.0 {
                return Err(modulo_by_zero(span));
            }
            l % r
        }
    };
    Ok(Value::Number(result))
}

/// `++` and `--` yield the adjacent value; they do not store it.
pub fn evaluate_unary(op: UnaryOp, operand: Value, span: Span) -> EvalResult<Value> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Incr, Value::Number(n)) => Ok(Value::Number(n + 1.0)),
        (UnaryOp::Decr, Value::Number(n)) => Ok(Value::Number(n - 1.0)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, other) => Err(operator_mismatch(op.as_symbol(), other.ty(), span)),
    }
}

/// Relational, equality and logical conditions. Both operands are always
/// evaluated before this is called.
pub fn evaluate_cond(op: CondOp, left: &Value, right: &Value, span: Span) -> EvalResult<Value> {
    let result = match (op, left, right) {
        (CondOp::Eq, l, r) => l == r,
        (CondOp::NotEq, l, r) => l != r,
        (CondOp::Gt, Value::Number(l), Value::Number(r)) => l > r,
        (CondOp::GtEq, Value::Number(l), Value::Number(r)) => l >= r,
        (CondOp::LtEq, Value::Number(l), Value::Number(r)) => l <= r,
        (CondOp::Lt, Value::Number(l), Value::Number(r)) => l < r,
        (CondOp::And, Value::Bool(l), Value::Bool(r)) => *l && *r,
        (CondOp::Or, Value::Bool(l), Value::Bool(r)) => *l || *r,
        (op, l, _) => return Err(operator_mismatch(op.as_symbol(), l.ty(), span)),
    };
    Ok(Value::Bool(result))
}

/// Combine a variable's current value with an assigned value.
///
/// `=` into a string variable stores the text form of the value.
pub fn apply_assign(
    op: AssignOp,
    declared: Type,
    current: Value,
    rhs: Value,
    span: Span,
) -> EvalResult<Value> {
    match op.binary_op() {
        None if declared == Type::String => Ok(Value::Str(rhs.to_text())),
        None => Ok(rhs),
        Some(bin) => evaluate_binary(bin, current, rhs, span),
    }
}
