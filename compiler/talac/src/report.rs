//! Per-phase outcome of a run.

use tala_diagnostic::{emitter::render_plain, Diagnostic};
use tala_eval::EvalError;

use crate::{FrontendError, FrontendPhase};

/// The first error of a run, flattened for shells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportedError {
    /// Category name, e.g. `TypeMismatchError` or `ArithmeticFault`.
    pub kind: String,
    /// Diagnostic code, e.g. `E2003`.
    pub code: String,
    pub message: String,
    pub start: u32,
    pub end: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    diagnostic: Option<Diagnostic>,
}

impl ReportedError {
    fn new(kind: &str, diagnostic: Diagnostic) -> Self {
        let span = diagnostic.primary_span().unwrap_or_default();
        ReportedError {
            kind: kind.to_string(),
            code: diagnostic.code.as_str().to_string(),
            message: diagnostic.message.clone(),
            start: span.start,
            end: span.end,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }
}

/// What a shell shows after a run.
///
/// A failed phase also fails every later phase: a semantic error means the
/// program never ran to completion, so `runtime_ok` is false too. A runtime
/// fault leaves the earlier phases passed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub lexical_ok: bool,
    pub syntax_ok: bool,
    pub semantic_ok: bool,
    pub runtime_ok: bool,
    /// Lines printed, including those printed before a failure.
    pub output: Vec<String>,
    pub error: Option<ReportedError>,
}

impl RunReport {
    pub(crate) fn success(output: Vec<String>) -> Self {
        RunReport {
            lexical_ok: true,
            syntax_ok: true,
            semantic_ok: true,
            runtime_ok: true,
            output,
            error: None,
        }
    }

    pub(crate) fn frontend_failure(err: &FrontendError) -> Self {
        let mut report = Self::success(Vec::new());
        report.lexical_ok = err.phase != FrontendPhase::Lexical;
        report.syntax_ok = false;
        report.semantic_ok = false;
        report.runtime_ok = false;
        report.error = Some(ReportedError::new(err.phase.kind(), err.to_diagnostic()));
        report
    }

    pub(crate) fn record_eval_error(&mut self, err: &EvalError) {
        if !err.is_runtime() {
            self.semantic_ok = false;
        }
        self.runtime_ok = false;
        self.error = Some(ReportedError::new(err.category().as_str(), err.to_diagnostic()));
    }

    /// All phases passed.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Output as one string, one `\n`-terminated line per print.
    pub fn output_text(&self) -> String {
        self.output.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    /// Render the error, with a source snippet when `source` is given.
    pub fn render_error(&self, source: Option<&str>) -> Option<String> {
        let diagnostic = self.error.as_ref()?.diagnostic()?;
        Some(render_plain(diagnostic, source))
    }
}
