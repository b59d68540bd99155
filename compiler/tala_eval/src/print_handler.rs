//! Destinations for `print` output.
//!
//! The evaluator appends one line per executed `print`. Where the line goes
//! is up to the caller:
//! - `Log`: ordered output log, readable after the run (default)
//! - `Stdout`: written straight to stdout and also logged
//! - `Silent`: discarded
//!
//! Enum dispatch rather than trait objects; printing is on the hot path of
//! every loop that prints.

use std::sync::Arc;

use parking_lot::Mutex;

/// Ordered output log.
#[derive(Debug, Default)]
pub struct OutputLog {
    lines: Mutex<Vec<String>>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }

    /// Snapshot of every line so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Print handler implementation using enum dispatch.
#[derive(Debug)]
pub enum PrintHandlerImpl {
    Log(OutputLog),
    /// Echo to stdout as well as logging.
    Stdout(OutputLog),
    Silent,
}

impl PrintHandlerImpl {
    /// Emit one output line.
    pub fn println(&self, line: &str) {
        match self {
            Self::Log(log) => log.push(line),
            Self::Stdout(log) => {
                println!("{line}");
                log.push(line);
            }
            Self::Silent => {}
        }
    }

    /// Lines emitted so far; empty for `Silent`.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Log(log) | Self::Stdout(log) => log.lines(),
            Self::Silent => Vec::new(),
        }
    }

    /// All output as one string, one `\n`-terminated line per print.
    pub fn get_output(&self) -> String {
        self.lines().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    pub fn clear(&self) {
        match self {
            Self::Log(log) | Self::Stdout(log) => log.clear(),
            Self::Silent => {}
        }
    }
}

/// Print handler shared between an evaluator and whoever reads its output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Output log handler (the evaluator's default).
pub fn log_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Log(OutputLog::new()))
}

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(OutputLog::new()))
}

/// Handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
