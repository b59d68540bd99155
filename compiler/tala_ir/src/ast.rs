//! Syntax tree consumed by the evaluator.
//!
//! The parser collaborator builds these nodes; the evaluator only reads them.
//! Children are owned (`Box` / `Vec`) so a whole program is a single value
//! that can be borrowed for the lifetime of an evaluation run.
//!
//! Declaration nodes carry no runtime state: the current value of a declared
//! variable lives in the evaluator's scope frame.

use std::fmt;

use crate::operators::{AssignOp, BinaryOp, CondOp, UnaryOp};
use crate::span::{Span, Spanned};
use crate::value::{Type, Value};

/// A syntax tree node.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Function definition payload, kept as its own struct so function tables
/// can refer to a definition without re-matching the node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDef {
    pub return_ty: Type,
    pub name: String,
    /// `ParamDecl` nodes, in positional order.
    pub params: Vec<Node>,
    pub body: Vec<Node>,
    /// Expression after `return`.
    pub ret: Box<Node>,
}

impl FunctionDef {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Node variants.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Root of a program: the top-level statement list.
    Program(Vec<Node>),

    // Statements
    /// `number x = 1;` or `number x;`
    VariableDecl {
        ty: Type,
        name: String,
        init: Option<Box<Node>>,
    },
    /// A function parameter, only found in `FunctionDef::params`.
    ParamDecl { ty: Type, name: String },
    /// `x = e;`, `x += e;`, ...
    Assignment {
        name: String,
        op: AssignOp,
        rhs: Box<Node>,
    },
    /// `f(a, b)`, used both as a statement and as an expression.
    FunctionCall { name: String, args: Vec<Node> },
    /// `def number f(number n) { ... return e; }`
    FunctionDef(FunctionDef),
    /// `print(e);` or `print();`
    Print(Option<Box<Node>>),
    /// `if (c) { ... }` with an optional `else { ... }`.
    If {
        cond: Box<Node>,
        then_block: Vec<Node>,
        else_block: Option<Vec<Node>>,
    },
    /// `while (c) { ... }`
    While { cond: Box<Node>, body: Vec<Node> },
    /// `break;`
    Break,

    // Expressions
    /// Arithmetic: `a + b`, `a % b`, ...
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `-a`, `++a`, `--a`, `!a`
    Unary { op: UnaryOp, operand: Box<Node> },
    /// Relational, equality and logical conditions.
    BinaryCond {
        op: CondOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Negated condition.
    UnaryCond { op: UnaryOp, operand: Box<Node> },
    Literal(Value),
    Identifier(String),
}

impl NodeKind {
    /// Short human-readable name of the node kind, for diagnostics and logs.
    pub const fn describe(&self) -> &'static str {
        match self {
            NodeKind::Program(_) => "program",
            NodeKind::VariableDecl { .. } => "variable declaration",
            NodeKind::ParamDecl { .. } => "parameter declaration",
            NodeKind::Assignment { .. } => "assignment",
            NodeKind::FunctionCall { .. } => "function call",
            NodeKind::FunctionDef(_) => "function definition",
            NodeKind::Print(_) => "print statement",
            NodeKind::If { .. } => "if statement",
            NodeKind::While { .. } => "while statement",
            NodeKind::Break => "break statement",
            NodeKind::Binary { .. } => "binary expression",
            NodeKind::Unary { .. } => "unary expression",
            NodeKind::BinaryCond { .. } => "condition",
            NodeKind::UnaryCond { .. } => "negated condition",
            NodeKind::Literal(_) => "literal",
            NodeKind::Identifier(_) => "identifier",
        }
    }

    /// Whether this node can appear where a value is expected.
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionCall { .. }
                | NodeKind::Binary { .. }
                | NodeKind::Unary { .. }
                | NodeKind::BinaryCond { .. }
                | NodeKind::UnaryCond { .. }
                | NodeKind::Literal(_)
                | NodeKind::Identifier(_)
        )
    }
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// Replace the span of a node built with the span-less constructors.
    #[must_use]
    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = Span::new(start, end);
        self
    }

    fn synthetic(kind: NodeKind) -> Self {
        Node::new(kind, Span::DUMMY)
    }

    pub fn program(statements: Vec<Node>) -> Self {
        Self::synthetic(NodeKind::Program(statements))
    }

    pub fn var_decl(ty: Type, name: impl Into<String>, init: Option<Node>) -> Self {
        Self::synthetic(NodeKind::VariableDecl {
            ty,
            name: name.into(),
            init: init.map(Box::new),
        })
    }

    pub fn param(ty: Type, name: impl Into<String>) -> Self {
        Self::synthetic(NodeKind::ParamDecl {
            ty,
            name: name.into(),
        })
    }

    pub fn assign(name: impl Into<String>, op: AssignOp, rhs: Node) -> Self {
        Self::synthetic(NodeKind::Assignment {
            name: name.into(),
            op,
            rhs: Box::new(rhs),
        })
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Self::synthetic(NodeKind::FunctionCall {
            name: name.into(),
            args,
        })
    }

    pub fn function(
        return_ty: Type,
        name: impl Into<String>,
        params: Vec<Node>,
        body: Vec<Node>,
        ret: Node,
    ) -> Self {
        Self::synthetic(NodeKind::FunctionDef(FunctionDef {
            return_ty,
            name: name.into(),
            params,
            body,
            ret: Box::new(ret),
        }))
    }

    pub fn print(expr: Option<Node>) -> Self {
        Self::synthetic(NodeKind::Print(expr.map(Box::new)))
    }

    pub fn if_stmt(cond: Node, then_block: Vec<Node>, else_block: Option<Vec<Node>>) -> Self {
        Self::synthetic(NodeKind::If {
            cond: Box::new(cond),
            then_block,
            else_block,
        })
    }

    pub fn while_loop(cond: Node, body: Vec<Node>) -> Self {
        Self::synthetic(NodeKind::While {
            cond: Box::new(cond),
            body,
        })
    }

    pub fn break_stmt() -> Self {
        Self::synthetic(NodeKind::Break)
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Self::synthetic(NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Self::synthetic(NodeKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn cond(op: CondOp, left: Node, right: Node) -> Self {
        Self::synthetic(NodeKind::BinaryCond {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn not(operand: Node) -> Self {
        Self::synthetic(NodeKind::UnaryCond {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        })
    }

    pub fn literal(value: Value) -> Self {
        Self::synthetic(NodeKind::Literal(value))
    }

    pub fn number(n: f64) -> Self {
        Self::literal(Value::Number(n))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::literal(Value::Str(text.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Self::literal(Value::Bool(b))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::synthetic(NodeKind::Identifier(name.into()))
    }

    /// Build a literal or identifier node from a raw token.
    ///
    /// The literal's value is parsed here, once; identifier-shaped tokens
    /// become `Identifier` nodes. Returns `None` if the text is neither.
    pub fn from_token(text: &str, span: Span) -> Option<Self> {
        match crate::value::classify(text)? {
            Type::Unresolved => Some(Node::new(NodeKind::Identifier(text.to_string()), span)),
            _ => Value::parse_literal(text).map(|v| Node::new(NodeKind::Literal(v), span)),
        }
    }

    /// Top-level statements if this is a `Program`.
    pub fn program_statements(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Program(stmts) => Some(stmts),
            _ => None,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Node {
    fn span(&self) -> Span {
        self.span
    }
}
