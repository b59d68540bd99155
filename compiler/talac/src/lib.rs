//! Talac - run driver for the Tala evaluator.
//!
//! A shell hands over whatever its front end produced: a syntax tree, or the
//! lexical or syntax error that stopped it. The driver validates and runs
//! the tree and reports the outcome per phase:
//!
//! ```text
//! front end ──► Result<Node, FrontendError>
//!     │
//!     ▼
//! run() / run_script() / validate() ──► RunReport
//!     lexical_ok, syntax_ok, semantic_ok, runtime_ok
//!     output lines, first error
//! ```
//!
//! # Environment
//!
//! - `RUST_LOG=tala_eval=debug`: evaluator spans and faults
//!   (after [`init_tracing`])
//! - `TALA_LOG_TREE=1`: hierarchical trace output
//! - `TALA_MAX_LOOP_ITERATIONS`, `TALA_MAX_CALL_DEPTH`, `TALA_SCRIPT_MODE`:
//!   read by [`RunConfig::from_env`]

mod config;
mod report;
mod tracing_setup;

use tala_diagnostic::{Diagnostic, ErrorCode};
use tala_eval::{log_handler, Evaluator};
use tala_ir::{Node, Span};
use thiserror::Error;
use tracing::debug;

pub use config::RunConfig;
pub use report::{ReportedError, RunReport};
pub use tracing_setup::init_tracing;

/// Front-end phase that can fail before the evaluator sees a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrontendPhase {
    Lexical,
    Syntax,
}

impl FrontendPhase {
    /// Name shells show as the error kind.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Lexical => "LexicalError",
            Self::Syntax => "SyntaxError",
        }
    }

    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::Lexical => ErrorCode::E0001,
            Self::Syntax => ErrorCode::E1001,
        }
    }
}

/// Failure reported by the scanner or parser.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FrontendError {
    pub phase: FrontendPhase,
    pub message: String,
    pub span: Span,
}

impl FrontendError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        FrontendError {
            phase: FrontendPhase::Lexical,
            message: message.into(),
            span,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        FrontendError {
            phase: FrontendPhase::Syntax,
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.phase {
            FrontendPhase::Lexical => "unrecognized input",
            FrontendPhase::Syntax => "unexpected here",
        };
        Diagnostic::error(self.phase.error_code())
            .with_message(self.message.clone())
            .with_label(self.span, label)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Execute,
    ValidateOnly,
}

/// Validate and execute a program.
pub fn run(parsed: &Result<Node, FrontendError>, config: &RunConfig) -> RunReport {
    drive(parsed, config, Mode::Execute)
}

/// Run in script mode: only the last top-level statement prints.
pub fn run_script(parsed: &Result<Node, FrontendError>, config: &RunConfig) -> RunReport {
    drive(parsed, &config.with_script_mode(true), Mode::Execute)
}

/// Validate without executing; the report never has output or a runtime
/// fault.
pub fn validate(parsed: &Result<Node, FrontendError>, config: &RunConfig) -> RunReport {
    drive(parsed, config, Mode::ValidateOnly)
}

fn drive(parsed: &Result<Node, FrontendError>, config: &RunConfig, mode: Mode) -> RunReport {
    let program = match parsed {
        Ok(program) => program,
        Err(err) => {
            debug!(phase = err.phase.kind(), "front end failed: {err}");
            return RunReport::frontend_failure(err);
        }
    };

    let output = log_handler();
    let mut evaluator = Evaluator::builder()
        .config(config.eval)
        .print_handler(output.clone())
        .build();
    let result = match mode {
        Mode::Execute => evaluator.run_program(program),
        Mode::ValidateOnly => evaluator.validate_program(program),
    };

    let mut report = RunReport::success(output.lines());
    if let Err(err) = result {
        report.record_eval_error(&err);
    }
    debug!(
        semantic_ok = report.semantic_ok,
        runtime_ok = report.runtime_ok,
        lines = report.output.len(),
        "run finished"
    );
    report
}
