//! Terminal emitter.
//!
//! Human-readable diagnostic output with optional ANSI colors. When the
//! source text is available, the primary label is shown under its line.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Trait for diagnostic output sinks.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` decides `Auto`; it is ignored for the other modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<(&'src str, LineOffsetTable)>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the source text so labels can show line, column and a snippet.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some((source, LineOffsetTable::build(source)));
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(severity.as_str(), color);
    }

    fn write_label(&mut self, label: &crate::Label) {
        let marker = if label.is_primary() { "-->" } else { "   " };
        let color = if label.is_primary() {
            colors::ERROR
        } else {
            colors::SECONDARY
        };

        let located = self.source.as_ref().map(|(source, table)| {
            let (line, col) = table.offset_to_line_col(source, label.span.start);
            (line, col, table.line_text(source, line).to_string())
        });
        let Some((line, col, text)) = located else {
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
            return;
        };

        let gutter = " ".repeat(line.to_string().len());
        let width = label.span.len().max(1) as usize;
        let underline = format!(
            "{}{} {}",
            " ".repeat(col.saturating_sub(1) as usize),
            if label.is_primary() { "^" } else { "-" }.repeat(width),
            label.message
        );

        let _ = writeln!(self.writer, "{gutter}{marker} {line}:{col}");
        let _ = writeln!(self.writer, "{gutter} |");
        let _ = writeln!(self.writer, "{line} | {text}");
        let _ = write!(self.writer, "{gutter} | ");
        self.write_colored(&underline, color);
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        if self.colors {
            let _ = write!(
                self.writer,
                "{}[{}]{}",
                colors::BOLD,
                diagnostic.code,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "[{}]", diagnostic.code);
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }
}

/// Render a diagnostic to a plain (uncolored) string.
pub fn render_plain(diagnostic: &Diagnostic, source: Option<&str>) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    if let Some(source) = source {
        emitter = emitter.with_source(source);
    }
    emitter.emit(diagnostic);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}
