//! Error types for validation and execution.
//!
//! `EvalErrorKind` carries the structured data for each failure; the factory
//! functions below are the construction API used by the evaluator, so every
//! message lives in one place.
//!
//! Every kind belongs to one [`ErrorCategory`], which decides the diagnostic
//! code and whether the failure is a semantic error (found by validation) or
//! a runtime fault (found only while executing).

use std::fmt;

use tala_ir::{Span, Type};
use thiserror::Error;

mod diagnostics;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Missing declarations
    #[error("`{name}` is not declared in this scope")]
    UndefinedVariable { name: String },
    #[error("no function `{name}` taking {arity} argument(s)")]
    UndefinedFunction { name: String, arity: usize },

    // Uniqueness
    #[error("`{name}` is already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("function `{name}` with {arity} parameter(s) is already defined")]
    DuplicateFunction { name: String, arity: usize },

    // Typing
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },
    #[error("operator `{op}` cannot be applied to {operand}")]
    OperatorMismatch { op: &'static str, operand: Type },

    // Grammar rules the parser cannot enforce
    #[error("`break` outside of a loop")]
    MisplacedBreak,
    #[error("unreachable statement after the loop has been exited")]
    UnreachableCode,
    #[error("duplicate `break`")]
    DuplicateBreak,
    #[error("ambiguous overload: `{name}` already has a definition with {arity} parameter(s)")]
    AmbiguousOverload { name: String, arity: usize },
    #[error("{what} cannot be used as a value")]
    NotAnExpression { what: &'static str },
    #[error("{what} cannot be used as a parameter")]
    InvalidParameter { what: &'static str },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,

    // Resource bounds
    #[error("loop exceeded {limit} iterations")]
    IterationLimitExceeded { limit: u64 },
    #[error("maximum call depth exceeded (limit: {limit})")]
    CallDepthExceeded { limit: usize },
}

/// Error category reported to shells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    MissingDeclaration,
    UniquenessViolation,
    TypeMismatch,
    OperatorMismatch,
    GenericGrammar,
    Arithmetic,
    ResourceExhaustion,
}

impl ErrorCategory {
    /// Name shells show as the error kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingDeclaration => "MissingDeclarationError",
            Self::UniquenessViolation => "UniquenessViolationError",
            Self::TypeMismatch => "TypeMismatchError",
            Self::OperatorMismatch => "OperatorMismatchError",
            Self::GenericGrammar => "GenericGrammarError",
            Self::Arithmetic => "ArithmeticFault",
            Self::ResourceExhaustion => "ResourceExhaustionFault",
        }
    }

    /// Faults that only execution can detect.
    pub const fn is_runtime(self) -> bool {
        matches!(self, Self::Arithmetic | Self::ResourceExhaustion)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EvalErrorKind {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. } | Self::UndefinedFunction { .. } => {
                ErrorCategory::MissingDeclaration
            }
            Self::DuplicateDeclaration { .. } | Self::DuplicateFunction { .. } => {
                ErrorCategory::UniquenessViolation
            }
            Self::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            Self::OperatorMismatch { .. } => ErrorCategory::OperatorMismatch,
            Self::MisplacedBreak
            | Self::UnreachableCode
            | Self::DuplicateBreak
            | Self::AmbiguousOverload { .. }
            | Self::NotAnExpression { .. }
            | Self::InvalidParameter { .. } => ErrorCategory::GenericGrammar,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCategory::Arithmetic,
            Self::IterationLimitExceeded { .. } | Self::CallDepthExceeded { .. } => {
                ErrorCategory::ResourceExhaustion
            }
        }
    }
}

/// Evaluation error: what went wrong and where.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind, span: Span) -> Self {
        EvalError { kind, span }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn is_runtime(&self) -> bool {
        self.category().is_runtime()
    }
}

// Missing declarations

#[cold]
pub fn undefined_variable(name: &str, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndefinedVariable {
            name: name.to_string(),
        },
        span,
    )
}

#[cold]
pub fn undefined_function(name: &str, arity: usize, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndefinedFunction {
            name: name.to_string(),
            arity,
        },
        span,
    )
}

// Uniqueness

#[cold]
pub fn duplicate_declaration(name: &str, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::DuplicateDeclaration {
            name: name.to_string(),
        },
        span,
    )
}

#[cold]
pub fn duplicate_function(name: &str, arity: usize, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::DuplicateFunction {
            name: name.to_string(),
            arity,
        },
        span,
    )
}

// Typing

#[cold]
pub fn type_mismatch(expected: Type, found: Type, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch { expected, found }, span)
}

#[cold]
pub fn operator_mismatch(op: &'static str, operand: Type, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::OperatorMismatch { op, operand }, span)
}

// Grammar

#[cold]
pub fn misplaced_break(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::MisplacedBreak, span)
}

#[cold]
pub fn unreachable_code(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::UnreachableCode, span)
}

#[cold]
pub fn duplicate_break(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::DuplicateBreak, span)
}

#[cold]
pub fn ambiguous_overload(name: &str, arity: usize, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::AmbiguousOverload {
            name: name.to_string(),
            arity,
        },
        span,
    )
}

#[cold]
pub fn not_an_expression(what: &'static str, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::NotAnExpression { what }, span)
}

#[cold]
pub fn invalid_parameter(what: &'static str, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidParameter { what }, span)
}

// Arithmetic

#[cold]
pub fn division_by_zero(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero, span)
}

#[cold]
pub fn modulo_by_zero(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::ModuloByZero, span)
}

// Resource bounds

#[cold]
pub fn iteration_limit_exceeded(limit: u64, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::IterationLimitExceeded { limit }, span)
}

#[cold]
pub fn call_depth_exceeded(limit: usize, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::CallDepthExceeded { limit }, span)
}
