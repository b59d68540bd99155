//! Branches, loops and `break`.
//!
//! # Break placement
//!
//! A statement *exits* if it is a `break`, or an `if`/`else` whose branches
//! both end in an exiting statement. Nothing may follow an exiting statement
//! in the same list. A `while` never exits the list around it: it consumes
//! the breaks of its own body.
//!
//! Each branch of an `if` may end in its own `break`; only when both do is
//! the `if` itself treated as the end of the list.

use tala_ir::{Node, NodeKind, Span, Type, Value};
use tracing::{debug, trace};

use super::{Ctx, Evaluator, Flow};
use crate::errors::{
    duplicate_break, iteration_limit_exceeded, misplaced_break, type_mismatch, unreachable_code,
    EvalResult,
};
use crate::infer::expect_type;

/// Whether control never reaches the statement after `stmt`.
fn exits(stmt: &Node) -> bool {
    match &stmt.kind {
        NodeKind::Break => true,
        NodeKind::If {
            then_block,
            else_block: Some(else_block),
            ..
        } => ends_in_exit(then_block) && ends_in_exit(else_block),
        _ => false,
    }
}

fn ends_in_exit(block: &[Node]) -> bool {
    block.last().is_some_and(exits)
}

/// Reject statements that follow an exit from the loop.
///
/// Outside any loop every `break` is misplaced; that is reported where the
/// `break` stands, so the layout is not checked there.
pub(crate) fn check_block_layout(statements: &[Node], loop_depth: u32) -> EvalResult<()> {
    if loop_depth == 0 {
        return Ok(());
    }
    let Some(pair) = statements.windows(2).find(|pair| exits(&pair[0])) else {
        return Ok(());
    };
    let (exit, next) = (&pair[0], &pair[1]);
    if matches!((&exit.kind, &next.kind), (NodeKind::Break, NodeKind::Break)) {
        Err(duplicate_break(next.span))
    } else {
        Err(unreachable_code(next.span))
    }
}

/// `break` is only legal inside a loop of the current function body.
pub(crate) fn exec_break(span: Span, ctx: Ctx) -> EvalResult<Flow> {
    if ctx.loop_depth == 0 {
        return Err(misplaced_break(span));
    }
    Ok(Flow::Break)
}

impl<'a> Evaluator<'a> {
    /// Both branches are always validated; only the taken one executes.
    pub(crate) fn exec_if(
        &mut self,
        cond: &'a Node,
        then_block: &'a [Node],
        else_block: Option<&'a [Node]>,
        ctx: Ctx,
    ) -> EvalResult<Flow> {
        self.check_condition(cond)?;
        let taken = if ctx.execute {
            Some(self.eval_condition(cond, ctx)?)
        } else {
            None
        };

        let then_flow = self.exec_block(then_block, ctx.live_if(taken == Some(true)))?;
        let else_flow = match else_block {
            Some(block) => self.exec_block(block, ctx.live_if(taken == Some(false)))?,
            None => Flow::Normal,
        };

        Ok(match taken {
            Some(true) => then_flow,
            Some(false) => else_flow,
            None => Flow::Normal,
        })
    }

    /// The condition is evaluated before every pass, including the one after
    /// a `break`; the loop then stops without running the body again. Every
    /// pass gets a fresh frame.
    pub(crate) fn exec_while(
        &mut self,
        cond: &'a Node,
        body: &'a [Node],
        span: Span,
        ctx: Ctx,
    ) -> EvalResult<Flow> {
        self.check_condition(cond)?;
        let body_ctx = ctx.inside_loop();
        if !ctx.execute {
            self.exec_block(body, body_ctx)?;
            return Ok(Flow::Normal);
        }

        let limit = self.config.max_loop_iterations;
        let mut passes: u64 = 0;
        let mut broke = false;
        loop {
            let again = self.eval_condition(cond, ctx)?;
            if broke || !again {
                break;
            }
            passes += 1;
            if passes > limit {
                debug!(limit, "loop iteration bound exceeded");
                return Err(iteration_limit_exceeded(limit, span));
            }
            trace!(pass = passes, "loop pass");
            broke = self.exec_block(body, body_ctx)? == Flow::Break;
        }

        if passes == 0 {
            self.exec_block(body, body_ctx.dead())?;
        }
        Ok(Flow::Normal)
    }

    fn check_condition(&self, cond: &Node) -> EvalResult<()> {
        let found = self.check_expr(cond)?;
        expect_type(Type::Boolean, found, cond.span)
    }

    fn eval_condition(&mut self, cond: &'a Node, ctx: Ctx) -> EvalResult<bool> {
        match self.eval_expr(cond, ctx)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch(Type::Boolean, other.ty(), cond.span)),
        }
    }
}
