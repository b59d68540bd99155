//! Evaluation limits and modes.

/// Configuration for one evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Passes a single run of one `while` loop may make.
    pub max_loop_iterations: u64,
    /// Nested function calls allowed at once.
    pub max_call_depth: usize,
    /// Only the last top-level statement may print.
    pub script_mode: bool,
}

impl EvalConfig {
    pub const DEFAULT_MAX_LOOP_ITERATIONS: u64 = 100_000;
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_loop_iterations: Self::DEFAULT_MAX_LOOP_ITERATIONS,
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
            script_mode: false,
        }
    }
}
