//! `EvaluatorBuilder` for creating evaluators with a given configuration.

use super::Evaluator;
use crate::environment::Environment;
use crate::{log_handler, EvalConfig, SharedPrintHandler};

/// Builder for [`Evaluator`].
///
/// Defaults: the limits of [`EvalConfig::default`], script mode off and a
/// fresh output log.
#[derive(Default)]
pub struct EvaluatorBuilder {
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_loop_iterations(mut self, limit: u64) -> Self {
        self.config.max_loop_iterations = limit;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, limit: usize) -> Self {
        self.config.max_call_depth = limit;
        self
    }

    /// Only the last top-level statement may print.
    #[must_use]
    pub fn script_mode(mut self, enabled: bool) -> Self {
        self.config.script_mode = enabled;
        self
    }

    /// Send output somewhere other than a private log, e.g. a log the
    /// caller keeps reading after the evaluator is gone.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build<'a>(self) -> Evaluator<'a> {
        Evaluator {
            env: Environment::new(),
            config: self.config,
            print_handler: self.print_handler.unwrap_or_else(log_handler),
        }
    }
}
