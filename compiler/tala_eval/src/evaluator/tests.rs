use pretty_assertions::assert_eq;
use tala_ir::{AssignOp, BinaryOp, CondOp, Node, Type};

use super::*;
use crate::errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
use crate::log_handler;

fn run(program: &Node) -> (EvalResult<()>, Vec<String>) {
    let mut evaluator = Evaluator::new();
    let result = evaluator.run_program(program);
    (result, evaluator.output())
}

fn output_of(program: &Node) -> Vec<String> {
    let (result, output) = run(program);
    result.unwrap();
    output
}

fn error_of(program: &Node) -> EvalError {
    run(program).0.unwrap_err()
}

fn num(n: f64) -> Node {
    Node::number(n)
}

fn var(name: &str) -> Node {
    Node::ident(name)
}

fn print(expr: Node) -> Node {
    Node::print(Some(expr))
}

/// `number name = value;`
fn number_decl(name: &str, value: f64) -> Node {
    Node::var_decl(Type::Numeric, name, Some(num(value)))
}

/// `name += 1;`
fn bump(name: &str) -> Node {
    Node::assign(name, AssignOp::AddAssign, num(1.0))
}

/// `while (name < limit) { body...; name += 1; }`
fn counting_loop(name: &str, limit: f64, mut body: Vec<Node>) -> Node {
    body.push(bump(name));
    Node::while_loop(Node::cond(CondOp::Lt, var(name), num(limit)), body)
}

// Basic programs

#[test]
fn test_print_number() {
    let program = Node::program(vec![number_decl("x", 1.0), print(var("x"))]);
    assert_eq!(output_of(&program), ["1"]);
}

#[test]
fn test_string_concatenation() {
    let program = Node::program(vec![
        Node::var_decl(Type::String, "a", Some(Node::string("hi"))),
        Node::var_decl(
            Type::String,
            "b",
            Some(Node::binary(BinaryOp::Add, var("a"), Node::string("!"))),
        ),
        print(var("b")),
    ]);
    assert_eq!(output_of(&program), ["hi!"]);
}

#[test]
fn test_function_call_result() {
    let program = Node::program(vec![
        Node::function(
            Type::Numeric,
            "fib",
            vec![Node::param(Type::Numeric, "n")],
            vec![],
            var("n"),
        ),
        Node::var_decl(Type::Numeric, "y", Some(Node::call("fib", vec![num(3.0)]))),
        print(var("y")),
    ]);
    assert_eq!(output_of(&program), ["3"]);
}

#[test]
fn test_break_outside_loop_in_dead_branch() {
    let program = Node::program(vec![Node::if_stmt(
        Node::boolean(false),
        vec![Node::break_stmt()],
        None,
    )]);
    let err = error_of(&program);
    assert_eq!(err.kind, EvalErrorKind::MisplacedBreak);
    assert_eq!(err.category(), ErrorCategory::GenericGrammar);
}

#[test]
fn test_division_by_zero_is_runtime_fault() {
    let program = Node::program(vec![
        Node::var_decl(Type::Numeric, "x", None),
        Node::assign(
            "x",
            AssignOp::Assign,
            Node::binary(BinaryOp::Div, num(1.0), num(0.0)).at(10, 13),
        ),
    ]);
    let err = error_of(&program);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.category(), ErrorCategory::Arithmetic);
    assert_eq!(err.span, tala_ir::Span::new(10, 13));
    assert!(err.is_runtime());
}

#[test]
fn test_statement_after_exiting_if_else_is_unreachable() {
    let program = Node::program(vec![Node::while_loop(
        Node::boolean(true),
        vec![
            Node::if_stmt(
                Node::boolean(false),
                vec![Node::break_stmt()],
                Some(vec![Node::break_stmt()]),
            ),
            Node::break_stmt().at(40, 46),
        ],
    )]);
    let err = error_of(&program);
    assert_eq!(err.kind, EvalErrorKind::UnreachableCode);
    assert_eq!(err.span, tala_ir::Span::new(40, 46));
}

// Scopes

#[test]
fn test_redeclaration_in_same_frame_fails() {
    let program = Node::program(vec![number_decl("x", 1.0), number_decl("x", 2.0)]);
    assert_eq!(error_of(&program).category(), ErrorCategory::UniquenessViolation);
}

#[test]
fn test_shadowing_in_nested_block() {
    let program = Node::program(vec![
        number_decl("x", 1.0),
        Node::if_stmt(
            Node::boolean(true),
            vec![
                Node::var_decl(Type::String, "x", Some(Node::string("inner"))),
                print(var("x")),
            ],
            None,
        ),
        print(var("x")),
    ]);
    assert_eq!(output_of(&program), ["inner", "1"]);
}

#[test]
fn test_block_locals_are_gone_after_block() {
    let program = Node::program(vec![
        Node::if_stmt(Node::boolean(true), vec![number_decl("y", 1.0)], None),
        print(var("y")),
    ]);
    assert_eq!(error_of(&program).category(), ErrorCategory::MissingDeclaration);
}

#[test]
fn test_assignment_reaches_enclosing_frame() {
    let program = Node::program(vec![
        number_decl("x", 1.0),
        Node::if_stmt(
            Node::boolean(true),
            vec![Node::assign("x", AssignOp::MulAssign, num(5.0))],
            None,
        ),
        print(var("x")),
    ]);
    assert_eq!(output_of(&program), ["5"]);
}

#[test]
fn test_uninitialized_declarations_hold_defaults() {
    let program = Node::program(vec![
        Node::var_decl(Type::Numeric, "n", None),
        Node::var_decl(Type::Boolean, "b", None),
        Node::var_decl(Type::String, "s", None),
        print(var("n")),
        print(var("b")),
        print(var("s")),
    ]);
    assert_eq!(output_of(&program), ["0", "false", ""]);
}

#[test]
fn test_initializer_cannot_see_its_own_variable() {
    let program = Node::program(vec![Node::var_decl(
        Type::Numeric,
        "x",
        Some(Node::binary(BinaryOp::Add, var("x"), num(1.0))),
    )]);
    assert_eq!(error_of(&program).category(), ErrorCategory::MissingDeclaration);
}

#[test]
fn test_scope_depth_restored_after_error() {
    let program = Node::program(vec![Node::if_stmt(
        Node::boolean(true),
        vec![Node::while_loop(
            Node::boolean(true),
            vec![print(Node::binary(BinaryOp::Mod, num(1.0), num(0.0)))],
        )],
        None,
    )]);
    let mut evaluator = Evaluator::new();
    let err = evaluator.run_program(&program).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    assert_eq!(evaluator.env().depth(), 1);
}

// Typing

#[test]
fn test_declaration_type_mismatch() {
    let program = Node::program(vec![Node::var_decl(
        Type::Numeric,
        "x",
        Some(Node::string("one")),
    )]);
    let err = error_of(&program);
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: Type::Numeric,
            found: Type::String,
        }
    );
}

#[test]
fn test_string_assignment_coerces() {
    let program = Node::program(vec![
        Node::var_decl(Type::String, "s", None),
        Node::assign("s", AssignOp::Assign, num(2.5)),
        Node::assign("s", AssignOp::AddAssign, Node::boolean(true)),
        print(var("s")),
    ]);
    assert_eq!(output_of(&program), ["2.5true"]);
}

#[test]
fn test_compound_assignment_on_numbers() {
    let program = Node::program(vec![
        number_decl("x", 10.0),
        Node::assign("x", AssignOp::SubAssign, num(4.0)),
        Node::assign("x", AssignOp::DivAssign, num(4.0)),
        print(var("x")),
        Node::assign("x", AssignOp::ModAssign, num(1.0)),
        print(var("x")),
    ]);
    assert_eq!(output_of(&program), ["1.5", "0.5"]);
}

#[test]
fn test_compound_assignment_on_boolean_is_operator_mismatch() {
    let program = Node::program(vec![
        Node::var_decl(Type::Boolean, "b", None),
        Node::assign("b", AssignOp::AddAssign, Node::boolean(true)),
    ]);
    assert_eq!(error_of(&program).category(), ErrorCategory::OperatorMismatch);
}

#[test]
fn test_non_boolean_condition() {
    let program = Node::program(vec![Node::if_stmt(num(1.0), vec![], None)]);
    assert_eq!(error_of(&program).category(), ErrorCategory::TypeMismatch);
}

#[test]
fn test_increment_does_not_store() {
    let program = Node::program(vec![
        number_decl("i", 1.0),
        print(Node::unary(tala_ir::UnaryOp::Incr, var("i"))),
        print(var("i")),
    ]);
    assert_eq!(output_of(&program), ["2", "1"]);
}

// Dead code

#[test]
fn test_error_in_untaken_branch_still_fails() {
    let program = Node::program(vec![
        print(Node::string("before")),
        Node::if_stmt(
            Node::boolean(true),
            vec![],
            Some(vec![print(var("missing"))]),
        ),
    ]);
    let (result, output) = run(&program);
    assert_eq!(
        result.unwrap_err().category(),
        ErrorCategory::MissingDeclaration
    );
    assert_eq!(output, ["before"]);
}

#[test]
fn test_dead_branch_does_not_print_or_fault() {
    let program = Node::program(vec![Node::if_stmt(
        Node::boolean(false),
        vec![print(Node::binary(BinaryOp::Div, num(1.0), num(0.0)))],
        Some(vec![print(Node::string("else"))]),
    )]);
    assert_eq!(output_of(&program), ["else"]);
}

#[test]
fn test_body_of_loop_that_never_runs_is_validated() {
    let program = Node::program(vec![Node::while_loop(
        Node::boolean(false),
        vec![Node::assign("nope", AssignOp::Assign, num(1.0))],
    )]);
    assert_eq!(error_of(&program).category(), ErrorCategory::MissingDeclaration);
}

#[test]
fn test_function_body_validated_at_definition() {
    let program = Node::program(vec![Node::function(
        Type::Numeric,
        "f",
        vec![],
        vec![print(Node::cond(CondOp::And, num(1.0), num(2.0)))],
        num(0.0),
    )]);
    assert_eq!(error_of(&program).category(), ErrorCategory::OperatorMismatch);
}

#[test]
fn test_validate_program_prints_nothing() {
    let program = Node::program(vec![
        print(Node::string("hello")),
        Node::while_loop(Node::boolean(true), vec![]),
    ]);
    let mut evaluator = Evaluator::new();
    evaluator.validate_program(&program).unwrap();
    assert!(evaluator.output().is_empty());
}

#[test]
fn test_validate_program_reports_semantic_errors() {
    let program = Node::program(vec![print(var("ghost"))]);
    let mut evaluator = Evaluator::new();
    let err = evaluator.validate_program(&program).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MissingDeclaration);
}

// Loops and break

#[test]
fn test_counting_loop() {
    let program = Node::program(vec![
        number_decl("i", 0.0),
        counting_loop("i", 3.0, vec![print(var("i"))]),
    ]);
    assert_eq!(output_of(&program), ["0", "1", "2"]);
}

#[test]
fn test_break_stops_loop() {
    let program = Node::program(vec![
        number_decl("i", 0.0),
        counting_loop(
            "i",
            10.0,
            vec![
                Node::if_stmt(
                    Node::cond(CondOp::Eq, var("i"), num(2.0)),
                    vec![Node::break_stmt()],
                    None,
                ),
                print(var("i")),
            ],
        ),
        print(Node::string("done")),
    ]);
    assert_eq!(output_of(&program), ["0", "1", "done"]);
}

#[test]
fn test_break_break_is_duplicate() {
    let program = Node::program(vec![Node::while_loop(
        Node::boolean(true),
        vec![Node::break_stmt(), Node::break_stmt()],
    )]);
    assert_eq!(error_of(&program).kind, EvalErrorKind::DuplicateBreak);
}

#[test]
fn test_statement_after_break_is_unreachable() {
    let program = Node::program(vec![Node::while_loop(
        Node::boolean(true),
        vec![Node::break_stmt(), print(num(1.0))],
    )]);
    assert_eq!(error_of(&program).kind, EvalErrorKind::UnreachableCode);
}

#[test]
fn test_break_in_function_inside_loop_is_misplaced() {
    let program = Node::program(vec![Node::while_loop(
        Node::boolean(false),
        vec![Node::function(
            Type::Numeric,
            "f",
            vec![],
            vec![Node::break_stmt()],
            num(0.0),
        )],
    )]);
    assert_eq!(error_of(&program).kind, EvalErrorKind::MisplacedBreak);
}

#[test]
fn test_each_pass_gets_fresh_frame() {
    let program = Node::program(vec![
        number_decl("i", 0.0),
        counting_loop("i", 2.0, vec![number_decl("tmp", 1.0)]),
    ]);
    assert_eq!(output_of(&program), Vec::<String>::new());
}

#[test]
fn test_iteration_limit() {
    let program = Node::program(vec![Node::while_loop(
        Node::boolean(true),
        vec![print(Node::string("tick"))],
    )
    .at(0, 20)]);
    let mut evaluator = Evaluator::builder().max_loop_iterations(3).build();
    let err = evaluator.run_program(&program).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IterationLimitExceeded { limit: 3 });
    assert_eq!(err.category(), ErrorCategory::ResourceExhaustion);
    assert_eq!(err.span, tala_ir::Span::new(0, 20));
    assert_eq!(evaluator.output().len(), 3);
}

// Functions

fn factorial() -> Node {
    Node::function(
        Type::Numeric,
        "fact",
        vec![Node::param(Type::Numeric, "n")],
        vec![
            Node::var_decl(Type::Numeric, "r", Some(num(1.0))),
            Node::if_stmt(
                Node::cond(CondOp::Gt, var("n"), num(1.0)),
                vec![Node::assign(
                    "r",
                    AssignOp::Assign,
                    Node::binary(
                        BinaryOp::Mul,
                        var("n"),
                        Node::call("fact", vec![Node::binary(BinaryOp::Sub, var("n"), num(1.0))]),
                    ),
                )],
                None,
            ),
        ],
        var("r"),
    )
}

#[test]
fn test_recursion() {
    let program = Node::program(vec![factorial(), print(Node::call("fact", vec![num(5.0)]))]);
    assert_eq!(output_of(&program), ["120"]);
}

#[test]
fn test_call_depth_limit() {
    let forever = Node::function(
        Type::Numeric,
        "down",
        vec![Node::param(Type::Numeric, "n")],
        vec![],
        Node::call("down", vec![var("n")]),
    );
    let program = Node::program(vec![forever, print(Node::call("down", vec![num(0.0)]))]);
    let mut evaluator = Evaluator::builder().max_call_depth(16).build();
    let err = evaluator.run_program(&program).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::CallDepthExceeded { limit: 16 });
    assert_eq!(evaluator.env().depth(), 1);
}

#[test]
fn test_function_cannot_see_caller_locals() {
    let program = Node::program(vec![
        number_decl("secret", 1.0),
        Node::function(Type::Numeric, "peek", vec![], vec![], var("secret")),
        Node::if_stmt(
            Node::boolean(true),
            vec![number_decl("secret", 7.0), print(Node::call("peek", vec![]))],
            None,
        ),
    ]);
    assert_eq!(output_of(&program), ["1"]);
}

/// `if (true) { number x = 1; def number f() { return x; } }` followed by a
/// second block that declares its own `x` of type `shadow_ty` and calls `f`.
fn closed_block_program(shadow_ty: Type, shadow: Node) -> Node {
    Node::program(vec![
        Node::if_stmt(
            Node::boolean(true),
            vec![
                number_decl("x", 1.0),
                Node::function(Type::Numeric, "f", vec![], vec![], var("x")),
            ],
            None,
        ),
        Node::if_stmt(
            Node::boolean(true),
            vec![
                Node::var_decl(shadow_ty, "x", Some(shadow)),
                print(Node::call("f", vec![])),
            ],
            None,
        ),
    ])
}

#[test]
fn test_function_from_closed_block_keeps_its_own_locals() {
    let program = closed_block_program(Type::Numeric, num(99.0));
    assert_eq!(output_of(&program), ["1"]);
}

#[test]
fn test_function_from_closed_block_ignores_caller_local_of_other_type() {
    let program = closed_block_program(Type::Boolean, Node::boolean(true));
    assert_eq!(output_of(&program), ["1"]);
}

#[test]
fn test_function_defined_in_loop_sees_current_pass() {
    // while (i < 3) { number j = i; def number g() { return j; } print(g()); i += 1; }
    let program = Node::program(vec![
        number_decl("i", 0.0),
        counting_loop(
            "i",
            3.0,
            vec![
                Node::var_decl(Type::Numeric, "j", Some(var("i"))),
                Node::function(Type::Numeric, "g", vec![], vec![], var("j")),
                print(Node::call("g", vec![])),
            ],
        ),
    ]);
    assert_eq!(output_of(&program), ["0", "1", "2"]);
}

#[test]
fn test_function_sees_globals_declared_before_it() {
    let program = Node::program(vec![
        number_decl("base", 40.0),
        Node::function(
            Type::Numeric,
            "plus",
            vec![Node::param(Type::Numeric, "n")],
            vec![],
            Node::binary(BinaryOp::Add, var("base"), var("n")),
        ),
        print(Node::call("plus", vec![num(2.0)])),
    ]);
    assert_eq!(output_of(&program), ["42"]);
}

#[test]
fn test_overloads_by_arity() {
    let program = Node::program(vec![
        Node::function(
            Type::String,
            "greet",
            vec![],
            vec![],
            Node::string("hello"),
        ),
        Node::function(
            Type::String,
            "greet",
            vec![Node::param(Type::String, "who")],
            vec![],
            Node::binary(BinaryOp::Add, Node::string("hi "), var("who")),
        ),
        print(Node::call("greet", vec![])),
        print(Node::call("greet", vec![Node::string("bo")])),
    ]);
    assert_eq!(output_of(&program), ["hello", "hi bo"]);
}

#[test]
fn test_wrong_argument_type() {
    let program = Node::program(vec![factorial(), print(Node::call("fact", vec![Node::string("5")]))]);
    assert_eq!(error_of(&program).category(), ErrorCategory::TypeMismatch);
}

#[test]
fn test_unknown_arity() {
    let program = Node::program(vec![factorial(), print(Node::call("fact", vec![]))]);
    assert_eq!(error_of(&program).category(), ErrorCategory::MissingDeclaration);
}

#[test]
fn test_return_type_checked() {
    let program = Node::program(vec![Node::function(
        Type::Boolean,
        "f",
        vec![],
        vec![],
        num(1.0),
    )]);
    assert_eq!(error_of(&program).category(), ErrorCategory::TypeMismatch);
}

#[test]
fn test_function_defined_in_loop_body() {
    let program = Node::program(vec![
        number_decl("i", 0.0),
        counting_loop(
            "i",
            2.0,
            vec![
                Node::function(Type::Numeric, "twice", vec![], vec![], num(2.0)),
                print(Node::call("twice", vec![])),
            ],
        ),
    ]);
    assert_eq!(output_of(&program), ["2", "2"]);
}

#[test]
fn test_parameter_must_be_declaration() {
    let program = Node::program(vec![Node::function(
        Type::Numeric,
        "f",
        vec![num(1.0)],
        vec![],
        num(0.0),
    )]);
    assert_eq!(
        error_of(&program).kind,
        EvalErrorKind::InvalidParameter {
            what: "literal"
        }
    );
}

// Output

#[test]
fn test_script_mode_prints_only_last_statement() {
    let program = Node::program(vec![
        Node::function(
            Type::Numeric,
            "loud",
            vec![],
            vec![print(Node::string("inside"))],
            num(1.0),
        ),
        print(Node::string("first")),
        Node::var_decl(Type::Numeric, "x", Some(Node::call("loud", vec![]))),
        print(Node::call("loud", vec![])),
    ]);
    let mut evaluator = Evaluator::builder().script_mode(true).build();
    evaluator.run_program(&program).unwrap();
    assert_eq!(evaluator.output(), ["inside", "1"]);
}

#[test]
fn test_output_kept_after_fault() {
    let program = Node::program(vec![
        print(Node::string("one")),
        print(Node::string("two")),
        print(Node::binary(BinaryOp::Mod, num(3.0), num(0.0))),
        print(Node::string("three")),
    ]);
    let (result, output) = run(&program);
    assert_eq!(result.unwrap_err().kind, EvalErrorKind::ModuloByZero);
    assert_eq!(output, ["one", "two"]);
}

#[test]
fn test_empty_print() {
    let program = Node::program(vec![Node::print(None)]);
    assert_eq!(output_of(&program), [""]);
}

#[test]
fn test_shared_handler_outlives_evaluator() {
    let handler = log_handler();
    let program = Node::program(vec![print(Node::boolean(true))]);
    {
        let mut evaluator = Evaluator::builder().print_handler(handler.clone()).build();
        evaluator.run_program(&program).unwrap();
    }
    assert_eq!(handler.lines(), ["true"]);
}

#[test]
fn test_single_statement_program() {
    let statement = print(num(-0.0));
    assert_eq!(output_of(&statement), ["0"]);
}

#[test]
fn test_runs_start_from_clean_scope() {
    let program = Node::program(vec![number_decl("x", 1.0)]);
    let mut evaluator = Evaluator::new();
    evaluator.run_program(&program).unwrap();
    evaluator.run_program(&program).unwrap();
}
