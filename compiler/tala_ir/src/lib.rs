//! Tala IR - syntax tree and value model for the Tala language.
//!
//! This crate holds everything the evaluator reads:
//! - [`Span`]: `[start, end)` byte offsets attached to every node
//! - [`Node`] / [`NodeKind`]: the closed syntax tree taxonomy
//! - [`Value`] / [`Type`]: runtime values and the static type lattice
//! - Operator enums for expressions, conditions and assignments
//!
//! Lexing and parsing live outside this workspace; a parser builds trees with
//! the constructors on [`Node`].

pub mod ast;
pub mod operators;
pub mod span;
pub mod value;

pub use ast::{FunctionDef, Node, NodeKind};
pub use operators::{AssignOp, BinaryOp, CondOp, UnaryOp};
pub use span::{Span, Spanned};
pub use value::{classify, format_number, is_identifier, Type, Value};
