//! Runtime values and the static type lattice.
//!
//! `Value` is what the interpreter computes; `Type` is what the validator
//! reasons about. Literal text is parsed into a `Value` exactly once, when
//! the parser collaborator builds a `Literal` node.

use std::fmt;

/// Static type of an expression.
///
/// `Unresolved` is the classification of a bare identifier token before it
/// has been looked up in scope. Type inference never returns it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Numeric,
    Boolean,
    String,
    Unresolved,
}

impl Type {
    /// Source keyword for the type, as written in declarations.
    pub const fn keyword(self) -> &'static str {
        match self {
            Type::Numeric => "number",
            Type::Boolean => "boolean",
            Type::String => "string",
            Type::Unresolved => "<unresolved>",
        }
    }

    /// Parse a declaration keyword.
    pub fn from_keyword(keyword: &str) -> Option<Type> {
        match keyword {
            "number" => Some(Type::Numeric),
            "boolean" | "bool" => Some(Type::Boolean),
            "string" => Some(Type::String),
            _ => None,
        }
    }

    /// Value held by a declaration of this type before anything is assigned.
    pub fn default_value(self) -> Value {
        match self {
            Type::Numeric | Type::Unresolved => Value::Number(0.0),
            Type::Boolean => Value::Bool(false),
            Type::String => Value::Str(String::new()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A runtime value.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Number(f64),
    Bool(bool),
    /// String contents, without the delimiting quotes.
    Str(String),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    pub const fn ty(&self) -> Type {
        match self {
            Value::Number(_) => Type::Numeric,
            Value::Bool(_) => Type::Boolean,
            Value::Str(_) => Type::String,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Text form used by `print` and by string coercion.
    ///
    /// Integral numbers print without a decimal point, other numbers in
    /// their shortest round-trip decimal form.
    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => s.clone(),
        }
    }

    /// Parse literal source text into a value.
    ///
    /// Returns `None` for identifier-shaped tokens (which must be resolved
    /// in scope) and for text that is not a literal at all.
    pub fn parse_literal(text: &str) -> Option<Value> {
        match classify(text)? {
            Type::String => Some(Value::Str(text[1..text.len() - 1].to_string())),
            Type::Numeric => text.parse::<f64>().ok().map(Value::Number),
            Type::Boolean => Some(Value::Bool(text == "true")),
            Type::Unresolved => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "'{s}'"),
            other => f.write_str(&other.to_text()),
        }
    }
}

/// Format a number the way `print` shows it.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Collapse -0 to 0.
        return "0".to_string();
    }
    // f64's Display already omits the fractional part for integral values.
    format!("{n}")
}

/// Classify literal source text.
///
/// - `'...'` whose body is made of safe characters is a string
/// - a signed decimal number is numeric
/// - `true` / `false` is boolean
/// - any other identifier-shaped token is unresolved
pub fn classify(text: &str) -> Option<Type> {
    if is_string_literal(text) {
        Some(Type::String)
    } else if is_number_literal(text) {
        Some(Type::Numeric)
    } else if text == "true" || text == "false" {
        Some(Type::Boolean)
    } else if is_identifier(text) {
        Some(Type::Unresolved)
    } else {
        None
    }
}

fn is_string_literal(text: &str) -> bool {
    let Some(body) = text
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    else {
        return false;
    };
    body.chars()
        .all(|c| c != '\'' && c != '\\' && !c.is_control())
}

fn is_number_literal(text: &str) -> bool {
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.map_or(true, digits)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
