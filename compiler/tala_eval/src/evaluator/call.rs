//! Function definition and calls.
//!
//! A definition registers its signature before the body is validated, so
//! the body may call the function recursively. The body is validated at the
//! definition and validated again, in lockstep with execution, on every
//! call.
//!
//! A call sees the frames that were visible where the function was defined,
//! never the caller's locals.

use smallvec::SmallVec;
use tala_ir::{FunctionDef, Node, NodeKind, Span, Value};
use tracing::trace;

use super::control::check_block_layout;
use super::{Ctx, Evaluator, Flow};
use crate::environment::{Declaration, FunctionSignature};
use crate::errors::{call_depth_exceeded, invalid_parameter, undefined_function, EvalResult};
use crate::infer::expect_type;
use crate::stack::with_stack_headroom;

type Args = SmallVec<[Value; 4]>;

impl<'a> Evaluator<'a> {
    pub(crate) fn define_function(
        &mut self,
        def: &'a FunctionDef,
        span: Span,
        ctx: Ctx,
    ) -> EvalResult<Flow> {
        let scope = self.env.capture();
        self.env
            .declare_function(FunctionSignature::new(def, span, scope))?;

        let mut scoped = self.scoped();
        scoped.declare_params(def, Args::new())?;
        scoped.run_body(def, ctx.dead().function_body())?;
        Ok(Flow::Normal)
    }

    pub(crate) fn call_function(
        &mut self,
        name: &str,
        args: &'a [Node],
        span: Span,
        ctx: Ctx,
    ) -> EvalResult<Value> {
        let sig = self
            .env
            .resolve_function(name, args.len())
            .cloned()
            .ok_or_else(|| undefined_function(name, args.len(), span))?;

        let mut values = Args::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, ctx)?);
        }

        let limit = self.config.max_call_depth;
        if ctx.call_depth >= limit {
            return Err(call_depth_exceeded(limit, span));
        }
        let call_ctx = Ctx {
            execute: true,
            loop_depth: 0,
            may_print: ctx.may_print,
            call_depth: ctx.call_depth + 1,
        };
        with_stack_headroom(|| self.invoke(&sig, values, call_ctx))
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(name = sig.name(), arity = sig.arity(), depth = ctx.call_depth)
    )]
    fn invoke(&mut self, sig: &FunctionSignature<'a>, args: Args, ctx: Ctx) -> EvalResult<Value> {
        let mut call = self.call_scope(&sig.scope);
        call.declare_params(sig.def, args)?;
        call.run_body(sig.def, ctx)
    }

    /// Declare the parameters in the current frame, bound positionally to
    /// `args`; parameters without an argument keep their type's default.
    fn declare_params(&mut self, def: &'a FunctionDef, args: Args) -> EvalResult<()> {
        let mut args = args.into_iter();
        for param in &def.params {
            let NodeKind::ParamDecl { ty, name } = &param.kind else {
                return Err(invalid_parameter(param.kind.describe(), param.span));
            };
            let mut decl = Declaration::new(name, *ty, param.span);
            if let Some(value) = args.next() {
                decl.value = value;
            }
            self.env.declare(decl)?;
        }
        Ok(())
    }

    /// Body statements, then the return expression.
    fn run_body(&mut self, def: &'a FunctionDef, ctx: Ctx) -> EvalResult<Value> {
        check_block_layout(&def.body, ctx.loop_depth)?;
        self.exec_statements(&def.body, ctx)?;

        let found = self.check_expr(&def.ret)?;
        expect_type(def.return_ty, found, def.ret.span)?;
        if !ctx.execute {
            return Ok(def.return_ty.default_value());
        }
        let value = self.eval_expr(&def.ret, ctx)?;
        trace!(name = %def.name, %value, "return");
        Ok(value)
    }
}
