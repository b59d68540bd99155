//! Run configuration, optionally read from the environment.

use std::str::FromStr;

use tala_eval::EvalConfig;
use tracing::warn;

const MAX_LOOP_ITERATIONS: &str = "TALA_MAX_LOOP_ITERATIONS";
const MAX_CALL_DEPTH: &str = "TALA_MAX_CALL_DEPTH";
const SCRIPT_MODE: &str = "TALA_SCRIPT_MODE";

/// Settings for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub eval: EvalConfig,
}

impl RunConfig {
    pub fn new(eval: EvalConfig) -> Self {
        RunConfig { eval }
    }

    /// Defaults overridden by `TALA_MAX_LOOP_ITERATIONS`,
    /// `TALA_MAX_CALL_DEPTH` and `TALA_SCRIPT_MODE`. Invalid values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RunConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EvalConfig::default();
        RunConfig {
            eval: EvalConfig {
                max_loop_iterations: parse_var(
                    &lookup,
                    MAX_LOOP_ITERATIONS,
                    defaults.max_loop_iterations,
                ),
                max_call_depth: parse_var(&lookup, MAX_CALL_DEPTH, defaults.max_call_depth),
                script_mode: lookup(SCRIPT_MODE)
                    .map_or(defaults.script_mode, |raw| parse_flag(SCRIPT_MODE, &raw)),
            },
        }
    }

    #[must_use]
    pub fn with_script_mode(mut self, enabled: bool) -> Self {
        self.eval.script_mode = enabled;
        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    if let Ok(value) = raw.trim().parse() {
        value
    } else {
        warn!(key, value = %raw, "ignoring invalid setting");
        default
    }
}

fn parse_flag(key: &str, raw: &str) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(key, value = %raw, "ignoring invalid flag");
            false
        }
    }
}
