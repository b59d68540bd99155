//! The evaluator: validation and execution in one walk.
//!
//! Every statement is validated before it runs, so no unchecked code is ever
//! executed. A per-call [`Ctx`] is threaded through the recursion; when its
//! `execute` flag is off the walker only validates. That is how dead code is
//! handled:
//! - the branch a live `if` does not take
//! - the body of a `while` that never ran
//! - a function body at its definition
//!
//! `Evaluator::validate_program` walks a whole program with `execute` off.

mod builder;
mod call;
mod control;
mod expressions;
mod scope_guard;
mod statements;

use tala_ir::{Node, NodeKind};
use tracing::debug;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::{EvalConfig, SharedPrintHandler};

pub use builder::EvaluatorBuilder;

/// Walk state that changes with nesting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Ctx {
    /// Execute as well as validate.
    pub execute: bool,
    /// Enclosing `while` loops within the current function body.
    pub loop_depth: u32,
    /// Whether a `print` may reach the output log.
    pub may_print: bool,
    /// Function calls currently active.
    pub call_depth: usize,
}

impl Ctx {
    pub fn top_level(execute: bool) -> Self {
        Ctx {
            execute,
            loop_depth: 0,
            may_print: true,
            call_depth: 0,
        }
    }

    /// Validate only.
    #[must_use]
    pub fn dead(self) -> Self {
        Ctx {
            execute: false,
            ..self
        }
    }

    /// Keep executing only if `live`.
    #[must_use]
    pub fn live_if(self, live: bool) -> Self {
        if live {
            self
        } else {
            self.dead()
        }
    }

    #[must_use]
    pub fn inside_loop(self) -> Self {
        Ctx {
            loop_depth: self.loop_depth.saturating_add(1),
            ..self
        }
    }

    /// Loops outside a function body cannot be exited from inside it.
    #[must_use]
    pub fn function_body(self) -> Self {
        Ctx {
            loop_depth: 0,
            ..self
        }
    }
}

/// How a statement finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Normal,
    /// A `break` ran; the innermost loop stops.
    Break,
}

/// Validator and tree-walking interpreter.
///
/// The tree is borrowed for `'a`; function table entries point into it.
pub struct Evaluator<'a> {
    pub(crate) env: Environment<'a>,
    pub(crate) config: EvalConfig,
    pub(crate) print_handler: SharedPrintHandler,
}

impl<'a> Evaluator<'a> {
    /// Evaluator with the default configuration and an output log.
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Lines printed so far, including those printed before a failure.
    pub fn output(&self) -> Vec<String> {
        self.print_handler.lines()
    }

    pub fn env(&self) -> &Environment<'a> {
        &self.env
    }

    /// Validate and execute a program.
    ///
    /// A node that is not a `Program` runs as a one-statement program. Each
    /// run starts from an empty scope stack and function table; the output
    /// log is left to its owner.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_program(&mut self, program: &'a Node) -> EvalResult<()> {
        self.walk_program(program, Ctx::top_level(true))
    }

    /// Validate a program without executing any of it.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn validate_program(&mut self, program: &'a Node) -> EvalResult<()> {
        self.walk_program(program, Ctx::top_level(false))
    }

    fn walk_program(&mut self, program: &'a Node, ctx: Ctx) -> EvalResult<()> {
        self.env = Environment::new();
        let statements = match &program.kind {
            NodeKind::Program(statements) => statements.as_slice(),
            _ => std::slice::from_ref(program),
        };
        let result = self.exec_program(statements, ctx);
        if let Err(err) = &result {
            debug!(category = %err.category(), span = ?err.span, "evaluation failed: {err}");
        }
        result
    }

    /// Top-level statements share the program frame. In script mode only the
    /// last one may print.
    fn exec_program(&mut self, statements: &'a [Node], ctx: Ctx) -> EvalResult<()> {
        let script_mode = self.config.script_mode;
        let last = statements.len().saturating_sub(1);
        let mut scoped = self.scoped();
        for (i, stmt) in statements.iter().enumerate() {
            let may_print = !script_mode || i == last;
            scoped.exec_stmt(stmt, Ctx { may_print, ..ctx })?;
        }
        Ok(())
    }
}

impl Default for Evaluator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
