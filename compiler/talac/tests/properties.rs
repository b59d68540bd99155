//! Property tests for scoping and typing rules.

use proptest::prelude::*;
use tala_ir::{AssignOp, BinaryOp, CondOp, Node, Type, Value};
use talac::{run, RunConfig, RunReport};

fn run_program(statements: Vec<Node>) -> RunReport {
    run(&Ok(Node::program(statements)), &RunConfig::default())
}

fn error_kind(report: &RunReport) -> Option<&str> {
    report.error.as_ref().map(|e| e.kind.as_str())
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn declared_type() -> impl Strategy<Value = Type> {
    prop_oneof![Just(Type::Numeric), Just(Type::Boolean), Just(Type::String)]
}

fn literal_of(ty: Type) -> Node {
    match ty {
        Type::Boolean => Node::boolean(true),
        Type::String => Node::string("text"),
        _ => Node::number(1.0),
    }
}

proptest! {
    #[test]
    fn redeclaring_in_same_frame_fails(name in identifier(), first in declared_type(), second in declared_type()) {
        let report = run_program(vec![
            Node::var_decl(first, name.clone(), None),
            Node::var_decl(second, name, None),
        ]);
        prop_assert_eq!(error_kind(&report), Some("UniquenessViolationError"));
    }

    #[test]
    fn redeclaring_in_nested_frame_shadows(name in identifier(), outer in declared_type(), inner in declared_type()) {
        let report = run_program(vec![
            Node::var_decl(outer, name.clone(), None),
            Node::if_stmt(
                Node::boolean(true),
                vec![
                    Node::var_decl(inner, name.clone(), Some(literal_of(inner))),
                    Node::print(Some(Node::ident(name.clone()))),
                ],
                None,
            ),
            Node::print(Some(Node::ident(name))),
        ]);
        prop_assert!(report.is_ok());
        prop_assert_eq!(
            report.output,
            vec![
                literal_of_value(inner).to_text(),
                outer.default_value().to_text(),
            ]
        );
    }

    #[test]
    fn assigning_other_type_is_mismatch(declared in declared_type(), assigned in declared_type()) {
        prop_assume!(declared != assigned && declared != Type::String);
        let report = run_program(vec![
            Node::var_decl(declared, "v", None),
            Node::assign("v", AssignOp::Assign, literal_of(assigned)),
        ]);
        prop_assert_eq!(error_kind(&report), Some("TypeMismatchError"));
    }

    #[test]
    fn integer_arithmetic_prints_integers(a in -10_000i32..10_000, b in -10_000i32..10_000) {
        let sum = Node::binary(BinaryOp::Add, Node::number(f64::from(a)), Node::number(f64::from(b)));
        let product = Node::binary(BinaryOp::Mul, Node::number(f64::from(a)), Node::number(f64::from(b)));
        let report = run_program(vec![Node::print(Some(sum)), Node::print(Some(product))]);
        prop_assert_eq!(
            report.output,
            vec![(a + b).to_string(), (i64::from(a) * i64::from(b)).to_string()]
        );
    }

    #[test]
    fn counting_loop_runs_exactly_n_passes(n in 0u32..40) {
        let report = run_program(vec![
            Node::var_decl(Type::Numeric, "i", Some(Node::number(0.0))),
            Node::while_loop(
                Node::cond(CondOp::Lt, Node::ident("i"), Node::number(f64::from(n))),
                vec![
                    Node::print(Some(Node::ident("i"))),
                    Node::assign("i", AssignOp::AddAssign, Node::number(1.0)),
                ],
            ),
        ]);
        let expected: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        prop_assert_eq!(report.output, expected);
    }
}

fn literal_of_value(ty: Type) -> Value {
    match literal_of(ty).kind {
        tala_ir::NodeKind::Literal(value) => value,
        _ => ty.default_value(),
    }
}
