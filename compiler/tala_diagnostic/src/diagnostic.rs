//! The [`Diagnostic`] value handed to shells.

use std::fmt;

use tala_ir::Span;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a label is drawn.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelStyle {
    /// Where the error is.
    Primary,
    /// Related location, e.g. an earlier declaration.
    Context,
}

/// Message attached to a source range.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub style: LabelStyle,
}

impl Label {
    pub fn is_primary(&self) -> bool {
        self.style == LabelStyle::Primary
    }
}

/// A rendered-on-demand error report.
///
/// Built with `Diagnostic::error(code)` and the `with_*` methods; an
/// evaluation error contributes its message, one primary label and at most
/// one note.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is emitted"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    /// Hints shown after the labels.
    pub notes: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..self
        }
    }

    /// Mark where the error is.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labelled(span, message.into(), LabelStyle::Primary)
    }

    pub fn with_context(self, span: Span, message: impl Into<String>) -> Self {
        self.labelled(span, message.into(), LabelStyle::Context)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn labelled(mut self, span: Span, message: String, style: LabelStyle) -> Self {
        self.labels.push(Label {
            span,
            message,
            style,
        });
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(|label| label.span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

/// `error[E2003]: message`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
