//! Expression evaluation.
//!
//! Expressions are validated with [`infer_type`] before they are evaluated,
//! so evaluation only fails for faults that need runtime values.

use tala_ir::{Node, NodeKind, Span, Type, Value};

use super::{Ctx, Evaluator};
use crate::errors::{not_an_expression, undefined_variable, EvalResult};
use crate::infer::infer_type;
use crate::operators::{evaluate_binary, evaluate_cond, evaluate_unary};
use crate::stack::with_stack_headroom;

impl<'a> Evaluator<'a> {
    /// Validate an expression against the current scope.
    pub(crate) fn check_expr(&self, node: &Node) -> EvalResult<Type> {
        infer_type(&self.env, node)
    }

    pub(crate) fn eval_expr(&mut self, node: &'a Node, ctx: Ctx) -> EvalResult<Value> {
        with_stack_headroom(|| self.eval_node(node, ctx))
    }

    fn eval_node(&mut self, node: &'a Node, ctx: Ctx) -> EvalResult<Value> {
        match &node.kind {
            NodeKind::Literal(value) => Ok(value.clone()),
            NodeKind::Identifier(name) => self.lookup_value(name, node.span),
            NodeKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, ctx)?;
                let right = self.eval_expr(right, ctx)?;
                evaluate_binary(*op, left, right, node.span)
            }
            NodeKind::Unary { op, operand } | NodeKind::UnaryCond { op, operand } => {
                let operand = self.eval_expr(operand, ctx)?;
                evaluate_unary(*op, operand, node.span)
            }
            // No short circuit: both sides are evaluated.
            NodeKind::BinaryCond { op, left, right } => {
                let left = self.eval_expr(left, ctx)?;
                let right = self.eval_expr(right, ctx)?;
                evaluate_cond(*op, &left, &right, node.span)
            }
            NodeKind::FunctionCall { name, args } => self.call_function(name, args, node.span, ctx),
            other => Err(not_an_expression(other.describe(), node.span)),
        }
    }

    /// Current value of a visible variable.
    pub(crate) fn lookup_value(&self, name: &str, span: Span) -> EvalResult<Value> {
        self.env
            .lookup_value(name)
            .ok_or_else(|| undefined_variable(name, span))
    }
}
