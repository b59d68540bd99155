//! Diagnostic system for Tala error reporting.
//!
//! Every error the evaluator raises converts into a [`Diagnostic`]:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//! - optional notes
//!
//! [`emitter::TerminalEmitter`] renders diagnostics for terminals and tests.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, LabelStyle, Severity};
pub use error_code::ErrorCode;
