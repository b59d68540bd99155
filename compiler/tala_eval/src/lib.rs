//! Tala Eval - validator and tree-walking interpreter for Tala programs.
//!
//! Validation and execution happen in one walk over the syntax tree: each
//! statement is checked against the current scope before it runs, and code
//! that does not run (an untaken branch, a loop body that never ran, a
//! function body at its definition) is checked without running.
//!
//! # Architecture
//!
//! - `Environment`: scope stack of insertion-ordered frames plus a global
//!   function table keyed by name and arity
//! - `infer_type`: static typing of expressions against the scope stack
//! - `evaluate_binary` / `evaluate_unary` / `evaluate_cond`: enum-based
//!   operator dispatch on runtime values
//! - `Evaluator`: the walker, with RAII scope guards and bounded loops and
//!   recursion
//! - `PrintHandlerImpl`: where `print` output goes
//!
//! Every failure is an [`EvalError`] whose [`ErrorCategory`] tells semantic
//! errors from runtime faults; `EvalError::to_diagnostic` renders it for a
//! shell.

mod config;
mod environment;
pub mod errors;
mod evaluator;
mod infer;
mod operators;
mod print_handler;
mod stack;

pub use config::EvalConfig;
pub use environment::{
    Declaration, Environment, Frame, FunctionSignature, LocalScope, ScopeChain,
};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use infer::{check_assignment, infer_type};
pub use operators::{apply_assign, evaluate_binary, evaluate_cond, evaluate_unary};
pub use print_handler::{
    log_handler, silent_handler, stdout_handler, OutputLog, PrintHandlerImpl, SharedPrintHandler,
};
