//! Statement execution.

use tala_ir::{AssignOp, Node, NodeKind, Span, Type};
use tracing::trace;

use super::control::{check_block_layout, exec_break};
use super::{Ctx, Evaluator, Flow};
use crate::environment::Declaration;
use crate::errors::{undefined_variable, EvalResult};
use crate::infer::{check_assignment, expect_type};
use crate::operators::apply_assign;

impl<'a> Evaluator<'a> {
    /// Validate one statement, then run it if `ctx.execute` is set.
    pub(crate) fn exec_stmt(&mut self, stmt: &'a Node, ctx: Ctx) -> EvalResult<Flow> {
        trace!(kind = stmt.kind.describe(), span = ?stmt.span, execute = ctx.execute, "statement");
        match &stmt.kind {
            NodeKind::VariableDecl { ty, name, init } => {
                self.exec_var_decl(*ty, name, init.as_deref(), stmt.span, ctx)
            }
            NodeKind::ParamDecl { ty, name } => {
                self.env.declare(Declaration::new(name, *ty, stmt.span))?;
                Ok(Flow::Normal)
            }
            NodeKind::Assignment { name, op, rhs } => {
                self.exec_assignment(name, *op, rhs, stmt.span, ctx)
            }
            NodeKind::FunctionDef(def) => self.define_function(def, stmt.span, ctx),
            NodeKind::Print(expr) => self.exec_print(expr.as_deref(), ctx),
            NodeKind::If {
                cond,
                then_block,
                else_block,
            } => self.exec_if(cond, then_block, else_block.as_deref(), ctx),
            NodeKind::While { cond, body } => self.exec_while(cond, body, stmt.span, ctx),
            NodeKind::Break => exec_break(stmt.span, ctx),
            NodeKind::Program(statements) => self.exec_block(statements, ctx),
            // Calls and other expressions: the value is discarded.
            _ => {
                self.check_expr(stmt)?;
                if ctx.execute {
                    self.eval_expr(stmt, ctx)?;
                }
                Ok(Flow::Normal)
            }
        }
    }

    /// Run a statement list in its own frame.
    pub(crate) fn exec_block(&mut self, statements: &'a [Node], ctx: Ctx) -> EvalResult<Flow> {
        check_block_layout(statements, ctx.loop_depth)?;
        let mut scoped = self.scoped();
        scoped.exec_statements(statements, ctx)
    }

    /// Run statements in the current frame.
    ///
    /// Once a `break` has run, the rest of the list is still validated but
    /// no longer executed.
    pub(crate) fn exec_statements(&mut self, statements: &'a [Node], ctx: Ctx) -> EvalResult<Flow> {
        let mut ctx = ctx;
        let mut flow = Flow::Normal;
        for stmt in statements {
            if self.exec_stmt(stmt, ctx)? == Flow::Break && ctx.execute {
                flow = Flow::Break;
                ctx = ctx.dead();
            }
        }
        Ok(flow)
    }

    /// The initializer is checked before the name is declared, so it cannot
    /// refer to the variable it initializes.
    fn exec_var_decl(
        &mut self,
        ty: Type,
        name: &str,
        init: Option<&'a Node>,
        span: Span,
        ctx: Ctx,
    ) -> EvalResult<Flow> {
        let mut decl = Declaration::new(name, ty, span);
        if let Some(init) = init {
            let found = self.check_expr(init)?;
            expect_type(ty, found, init.span)?;
            if ctx.execute {
                decl.value = self.eval_expr(init, ctx)?;
            }
        }
        self.env.declare(decl)?;
        Ok(Flow::Normal)
    }

    fn exec_assignment(
        &mut self,
        name: &str,
        op: AssignOp,
        rhs: &'a Node,
        span: Span,
        ctx: Ctx,
    ) -> EvalResult<Flow> {
        let declared = self
            .env
            .lookup_type(name)
            .ok_or_else(|| undefined_variable(name, span))?;
        let found = self.check_expr(rhs)?;
        check_assignment(op, declared, found, span)?;

        if ctx.execute {
            let value = self.eval_expr(rhs, ctx)?;
            let current = self.lookup_value(name, span)?;
            let updated = apply_assign(op, declared, current, value, span)?;
            if !self.env.assign(name, updated) {
                return Err(undefined_variable(name, span));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_print(&mut self, expr: Option<&'a Node>, ctx: Ctx) -> EvalResult<Flow> {
        if let Some(expr) = expr {
            self.check_expr(expr)?;
        }
        if !ctx.execute {
            return Ok(Flow::Normal);
        }
        // The operand runs even when printing is suppressed.
        let text = match expr {
            Some(expr) => self.eval_expr(expr, ctx)?.to_text(),
            None => String::new(),
        };
        if ctx.may_print {
            self.print_handler.println(&text);
        }
        Ok(Flow::Normal)
    }
}
