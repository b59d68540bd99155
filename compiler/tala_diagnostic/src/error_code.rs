//! Error codes for all diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2003`) with the first digit
//! indicating the phase that raised it.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors (raised by the parser collaborator)
/// - E1xxx: Parser errors (raised by the parser collaborator)
/// - E2xxx: Semantic errors
/// - E6xxx: Runtime faults
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Lexical error
    E0001,
    /// Syntax error
    E1001,
    /// Missing declaration (identifier or function)
    E2001,
    /// Uniqueness violation (duplicate declaration or definition)
    E2002,
    /// Type mismatch
    E2003,
    /// Operator not applicable to operand type
    E2004,
    /// Grammar rule violation (break placement, unreachable code, overloads)
    E2005,
    /// Arithmetic fault
    E6001,
    /// Resource exhaustion (loop iterations, call depth)
    E6002,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E6001,
        ErrorCode::E6002,
    ];

    /// Get the code as a string (e.g., "E2003").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
        }
    }

    /// One-line description, used by `--explain` style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "lexical error",
            ErrorCode::E1001 => "syntax error",
            ErrorCode::E2001 => "missing declaration",
            ErrorCode::E2002 => "uniqueness violation",
            ErrorCode::E2003 => "type mismatch",
            ErrorCode::E2004 => "operator mismatch",
            ErrorCode::E2005 => "grammar rule violation",
            ErrorCode::E6001 => "arithmetic fault",
            ErrorCode::E6002 => "resource exhaustion",
        }
    }

    pub fn is_frontend_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E1001)
    }

    pub fn is_semantic_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
        )
    }

    pub fn is_runtime_error(&self) -> bool {
        matches!(self, ErrorCode::E6001 | ErrorCode::E6002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2003"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
