//! Type inference and the typing rules shared by validation.
//!
//! `infer_type` validates a whole expression subtree: identifiers must be
//! declared, calls must resolve with matching argument types, and every
//! operator must accept its operand types. It never returns
//! `Type::Unresolved`.

use tala_ir::{AssignOp, BinaryOp, CondOp, Node, NodeKind, Span, Type, UnaryOp};

use crate::environment::Environment;
use crate::errors::{
    not_an_expression, operator_mismatch, type_mismatch, undefined_function, undefined_variable,
    EvalResult,
};
use crate::stack::with_stack_headroom;

/// Infer the type of an expression, validating it on the way.
pub fn infer_type(env: &Environment<'_>, node: &Node) -> EvalResult<Type> {
    with_stack_headroom(|| infer_node(env, node))
}

fn infer_node(env: &Environment<'_>, node: &Node) -> EvalResult<Type> {
    match &node.kind {
        NodeKind::Literal(value) => Ok(value.ty()),
        NodeKind::Identifier(name) => env
            .lookup_type(name)
            .ok_or_else(|| undefined_variable(name, node.span)),
        NodeKind::Binary { op, left, right } => {
            let l = infer_type(env, left)?;
            let r = infer_type(env, right)?;
            binary_type(*op, l, r, node.span)
        }
        NodeKind::Unary { op, operand } => {
            let t = infer_type(env, operand)?;
            unary_type(*op, t, node.span)
        }
        NodeKind::BinaryCond { op, left, right } => {
            let l = infer_type(env, left)?;
            let r = infer_type(env, right)?;
            cond_type(*op, l, r, node.span)
        }
        NodeKind::UnaryCond { op, operand } => {
            let t = infer_type(env, operand)?;
            if *op != UnaryOp::Not {
                return Err(operator_mismatch(op.as_symbol(), t, node.span));
            }
            expect_type(Type::Boolean, t, operand.span)?;
            Ok(Type::Boolean)
        }
        NodeKind::FunctionCall { name, args } => {
            let sig = env
                .resolve_function(name, args.len())
                .ok_or_else(|| undefined_function(name, args.len(), node.span))?;
            for (arg, &param_ty) in args.iter().zip(&sig.param_types) {
                let found = infer_type(env, arg)?;
                expect_type(param_ty, found, arg.span)?;
            }
            Ok(sig.return_ty)
        }
        other => Err(not_an_expression(other.describe(), node.span)),
    }
}

/// `found` must be exactly `expected`.
pub fn expect_type(expected: Type, found: Type, span: Span) -> EvalResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(type_mismatch(expected, found, span))
    }
}

/// Arithmetic: `+` with a string operand concatenates; otherwise both
/// operands are numbers.
pub fn binary_type(op: BinaryOp, left: Type, right: Type, span: Span) -> EvalResult<Type> {
    if left == Type::String || right == Type::String {
        return match op {
            BinaryOp::Add => Ok(Type::String),
            _ => Err(operator_mismatch(op.as_symbol(), Type::String, span)),
        };
    }
    if left == Type::Boolean || right == Type::Boolean {
        return Err(operator_mismatch(op.as_symbol(), Type::Boolean, span));
    }
    expect_type(left, right, span)?;
    Ok(left)
}

pub fn unary_type(op: UnaryOp, operand: Type, span: Span) -> EvalResult<Type> {
    let required = match op {
        UnaryOp::Neg | UnaryOp::Incr | UnaryOp::Decr => Type::Numeric,
        UnaryOp::Not => Type::Boolean,
    };
    if operand == required {
        Ok(operand)
    } else {
        Err(operator_mismatch(op.as_symbol(), operand, span))
    }
}

/// Conditions always produce a boolean; both operands share one type.
pub fn cond_type(op: CondOp, left: Type, right: Type, span: Span) -> EvalResult<Type> {
    expect_type(left, right, span)?;
    let accepted = if op.is_relational() {
        left == Type::Numeric
    } else if op.is_logical() {
        left == Type::Boolean
    } else {
        true
    };
    if accepted {
        Ok(Type::Boolean)
    } else {
        Err(operator_mismatch(op.as_symbol(), left, span))
    }
}

/// Whether `rhs` may be assigned with `op` to a variable of type `declared`.
///
/// - `=` needs matching types; any value may be stored into a string
/// - `+=` on a string appends the text of any value
/// - other compound operators need a number on both sides
pub fn check_assignment(op: AssignOp, declared: Type, rhs: Type, span: Span) -> EvalResult<()> {
    match (op, declared) {
        (AssignOp::Assign | AssignOp::AddAssign, Type::String) => Ok(()),
        (AssignOp::Assign, _) => expect_type(declared, rhs, span),
        (_, Type::Numeric) => expect_type(Type::Numeric, rhs, span),
        _ => Err(operator_mismatch(op.as_symbol(), declared, span)),
    }
}
