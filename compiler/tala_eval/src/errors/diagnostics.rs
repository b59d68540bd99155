//! Conversion of evaluation errors into diagnostics.
//!
//! Codes follow the category table: E2001-E2005 for semantic errors found
//! by validation, E6001/E6002 for faults found while executing.

use tala_diagnostic::{Diagnostic, ErrorCode};

use super::{ErrorCategory, EvalError, EvalErrorKind};

impl ErrorCategory {
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::MissingDeclaration => ErrorCode::E2001,
            Self::UniquenessViolation => ErrorCode::E2002,
            Self::TypeMismatch => ErrorCode::E2003,
            Self::OperatorMismatch => ErrorCode::E2004,
            Self::GenericGrammar => ErrorCode::E2005,
            Self::Arithmetic => ErrorCode::E6001,
            Self::ResourceExhaustion => ErrorCode::E6002,
        }
    }
}

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        self.category().error_code()
    }

    /// Concise label for the primary span.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::UndefinedVariable { .. } => "not found in this scope",
            Self::UndefinedFunction { .. } => "function not found",
            Self::DuplicateDeclaration { .. } => "declared again here",
            Self::DuplicateFunction { .. } | Self::AmbiguousOverload { .. } => {
                "conflicting definition"
            }
            Self::TypeMismatch { .. } => "mismatched types",
            Self::OperatorMismatch { .. } => "operator not supported",
            Self::MisplacedBreak => "not inside a loop",
            Self::UnreachableCode => "unreachable",
            Self::DuplicateBreak => "loop already exited",
            Self::NotAnExpression { .. } => "expected a value",
            Self::InvalidParameter { .. } => "expected a parameter declaration",
            Self::DivisionByZero => "division by zero here",
            Self::ModuloByZero => "modulo by zero here",
            Self::IterationLimitExceeded { .. } => "loop bound exceeded",
            Self::CallDepthExceeded { .. } => "recursion limit exceeded",
        }
    }

    /// Actionable hint for the errors that have an obvious fix.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnreachableCode | Self::DuplicateBreak => {
                Some("`break` must be the last statement of its block".to_string())
            }
            Self::AmbiguousOverload { .. } => {
                Some("overloads of one function must differ in parameter count".to_string())
            }
            Self::DivisionByZero | Self::ModuloByZero => {
                Some("add a zero check before dividing".to_string())
            }
            _ => None,
        }
    }
}

impl EvalError {
    /// Convert into a diagnostic with the error message, a primary label at
    /// the error span and, for fixable errors, a note.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.primary_label());
        if let Some(suggestion) = self.kind.suggestion() {
            diag = diag.with_note(suggestion);
        }
        diag
    }
}
